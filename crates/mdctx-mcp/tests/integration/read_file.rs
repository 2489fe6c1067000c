//! Integration tests for `read_markdown_file` under both read policies.

use mdctx_content::ReadPolicy;
use rmcp::model::{ErrorCode, JsonObject};
use serde_json::json;
use tempfile::TempDir;

use crate::common::{TestHarness, guide, tool_text};

fn path_arg(path: impl AsRef<std::path::Path>) -> Option<JsonObject> {
    json!({ "file_path": path.as_ref().to_string_lossy() })
        .as_object()
        .cloned()
}

fn outside_file() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, "outside the docs root").unwrap();
    (dir, file)
}

// ============================================================================
// Confined (default)
// ============================================================================

#[tokio::test]
async fn test_reads_relative_path_inside_root() {
    let harness = TestHarness::new();
    let result = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg("get_api_specification.md"))
        .await
        .unwrap();
    assert_eq!(
        tool_text(&result),
        format!("File contents:\n{}", guide("get_api_specification.md"))
    );
}

#[tokio::test]
async fn test_reads_absolute_path_inside_root() {
    let harness = TestHarness::new();
    let path = harness.path("get_payment_flow.md");
    let result = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg(&path))
        .await
        .unwrap();
    assert!(tool_text(&result).ends_with(guide("get_payment_flow.md")));
}

#[tokio::test]
async fn test_rejects_path_outside_root() {
    let harness = TestHarness::new();
    let (_outside, file) = outside_file();

    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg(&file))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        err.data,
        Some(json!({"kind": "access_denied", "capability": "tool"}))
    );
}

#[tokio::test]
async fn test_rejects_traversal() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg("../../../etc/passwd"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_missing_file_inside_root() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg("get_refunds.md"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert!(err.message.contains("get_refunds.md"));
}

#[tokio::test]
async fn test_missing_argument() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("file_path"));
}

#[tokio::test]
async fn test_empty_path() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg(""))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

// ============================================================================
// Unrestricted
// ============================================================================

#[tokio::test]
async fn test_unrestricted_reads_any_path() {
    let harness = TestHarness::with_policy(ReadPolicy::Unrestricted);
    let (_outside, file) = outside_file();

    let result = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg(&file))
        .await
        .unwrap();
    assert_eq!(tool_text(&result), "File contents:\noutside the docs root");
}

#[tokio::test]
async fn test_unrestricted_missing_file() {
    let harness = TestHarness::with_policy(ReadPolicy::Unrestricted);
    let (outside, _) = outside_file();
    let missing = outside.path().join("absent.md");

    let err = harness
        .dispatcher
        .call_tool("read_markdown_file", path_arg(&missing))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert!(err.message.contains("absent.md"));
    assert!(harness.root().exists());
}

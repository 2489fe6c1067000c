//! Integration tests for the tool surface.

use mdctx_mcp::table::PAYMENT_CONTEXT_PREAMBLE;
use rmcp::model::ErrorCode;
use serde_json::json;

use crate::common::{TestHarness, guide, tool_text};

fn expected_payment_context(harness: &TestHarness) -> String {
    let sections = [
        ("Encryption Specification (mandatory)", "get_encryption_specification.md"),
        ("API Specification", "get_api_specification.md"),
        ("Error Codes", "get_error_codes.md"),
        ("Payment Flow", "get_payment_flow.md"),
        ("Signature Specification", "get_signature_guide.md"),
    ];
    let mut text = PAYMENT_CONTEXT_PREAMBLE.to_string();
    for (title, file) in sections {
        text.push_str(&format!("# {title}\n{}\n", harness.read(file)));
    }
    text
}

#[test]
fn test_list_tools() {
    let harness = TestHarness::new();
    let result = harness.dispatcher.list_tools();

    let names: Vec<&str> = result.tools.iter().map(|t| &*t.name).collect();
    assert_eq!(names, vec!["get_payment_context", "read_markdown_file"]);

    let read = &result.tools[1];
    assert_eq!(read.input_schema["required"], json!(["file_path"]));
    assert!(read.description.is_some());
}

#[test]
fn test_list_tools_is_idempotent() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.dispatcher.list_tools(),
        harness.dispatcher.list_tools()
    );
}

#[tokio::test]
async fn test_get_payment_context_order_and_preamble() {
    let harness = TestHarness::new();
    let result = harness
        .dispatcher
        .call_tool("get_payment_context", Some(serde_json::Map::new()))
        .await
        .expect("all guides are present");

    let text = tool_text(&result);
    assert!(text.starts_with(PAYMENT_CONTEXT_PREAMBLE));
    assert_eq!(text, expected_payment_context(&harness));

    let positions: Vec<usize> = [
        "get_encryption_specification.md",
        "get_api_specification.md",
        "get_error_codes.md",
        "get_payment_flow.md",
        "get_signature_guide.md",
    ]
    .iter()
    .map(|file| text.find(guide(file)).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_get_payment_context_without_arguments() {
    let harness = TestHarness::new();
    let result = harness
        .dispatcher
        .call_tool("get_payment_context", None)
        .await
        .unwrap();
    assert_eq!(tool_text(&result), expected_payment_context(&harness));
}

#[tokio::test]
async fn test_get_payment_context_missing_encryption_spec() {
    let harness = TestHarness::new();
    harness.remove("get_encryption_specification.md");

    let err = harness
        .dispatcher
        .call_tool("get_payment_context", None)
        .await
        .expect_err("a missing section fails the whole call");

    assert!(err.message.contains("get_encryption_specification.md"));
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(
        err.data,
        Some(json!({"kind": "aggregation_failed", "capability": "tool"}))
    );
}

#[tokio::test]
async fn test_get_payment_context_reads_current_content() {
    let harness = TestHarness::new();
    harness.dispatcher.call_tool("get_payment_context", None).await.unwrap();

    harness.rewrite("get_error_codes.md", "# Errors\n\nE999 added\n");
    let result = harness
        .dispatcher
        .call_tool("get_payment_context", None)
        .await
        .unwrap();
    assert!(tool_text(&result).contains("E999 added"));
}

#[tokio::test]
async fn test_unknown_tool() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .call_tool("get_weather", None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Unknown tool: get_weather");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_server_keeps_serving_after_failure() {
    let harness = TestHarness::new();
    harness.remove("get_signature_guide.md");
    assert!(
        harness
            .dispatcher
            .call_tool("get_payment_context", None)
            .await
            .is_err()
    );

    harness.rewrite("get_signature_guide.md", "# Signature\n\nrestored\n");
    let result = harness
        .dispatcher
        .call_tool("get_payment_context", None)
        .await
        .unwrap();
    assert!(tool_text(&result).contains("restored"));
}

#[tokio::test]
async fn test_concurrent_calls() {
    let harness = TestHarness::new();
    let calls: Vec<_> = (0..8)
        .map(|_| {
            let dispatcher = harness.dispatcher.clone();
            tokio::spawn(async move { dispatcher.call_tool("get_payment_context", None).await })
        })
        .collect();

    let expected = expected_payment_context(&harness);
    for call in calls {
        let result = call.await.unwrap().unwrap();
        assert_eq!(tool_text(&result), expected);
    }
}

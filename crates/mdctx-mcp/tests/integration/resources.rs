//! Integration tests for the resource surface.

use mdctx_mcp::table::ALL_DOCS_URI;
use rmcp::model::{ErrorCode, ReadResourceResult, ResourceContents};
use serde_json::json;

use crate::common::{GUIDES, TestHarness};

const SINGLE: [(&str, &str); 5] = [
    ("payment://docs/flow", "get_payment_flow.md"),
    ("payment://docs/api-spec", "get_api_specification.md"),
    ("payment://docs/encryption", "get_encryption_specification.md"),
    ("payment://docs/signature", "get_signature_guide.md"),
    ("payment://docs/error-codes", "get_error_codes.md"),
];

fn only_text(result: &ReadResourceResult) -> (&str, Option<&str>, &str) {
    assert_eq!(result.contents.len(), 1);
    match &result.contents[0] {
        ResourceContents::TextResourceContents {
            uri,
            mime_type,
            text,
            ..
        } => (uri.as_str(), mime_type.as_deref(), text.as_str()),
        _ => panic!("expected text contents"),
    }
}

#[test]
fn test_list_resources() {
    let harness = TestHarness::new();
    let result = harness.dispatcher.list_resources();

    let uris: Vec<&str> = result.resources.iter().map(|r| r.raw.uri.as_str()).collect();
    let mut expected: Vec<&str> = SINGLE.iter().map(|(uri, _)| *uri).collect();
    expected.push(ALL_DOCS_URI);
    assert_eq!(uris, expected);

    for resource in &result.resources {
        assert_eq!(resource.raw.mime_type.as_deref(), Some("text/markdown"));
        assert!(!resource.raw.name.is_empty());
        assert!(resource.raw.description.is_some());
    }
    assert_eq!(result, harness.dispatcher.list_resources());
}

#[tokio::test]
async fn test_read_flow_resource() {
    let harness = TestHarness::new();
    let result = harness
        .dispatcher
        .read_resource("payment://docs/flow")
        .await
        .unwrap();

    let (uri, mime, text) = only_text(&result);
    assert_eq!(uri, "payment://docs/flow");
    assert_eq!(mime, Some("text/markdown"));
    assert_eq!(text, harness.read("get_payment_flow.md"));

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(
        wire,
        json!({"contents": [{
            "uri": "payment://docs/flow",
            "mimeType": "text/markdown",
            "text": harness.read("get_payment_flow.md"),
        }]})
    );
}

#[tokio::test]
async fn test_single_resources_are_byte_identical_and_fresh() {
    let harness = TestHarness::new();
    for (uri, file) in SINGLE {
        let result = harness.dispatcher.read_resource(uri).await.unwrap();
        assert_eq!(only_text(&result).2, harness.read(file), "{uri}");

        let edited = format!("{}\nEdited for {uri}\r\n", harness.read(file));
        harness.rewrite(file, &edited);
        let result = harness.dispatcher.read_resource(uri).await.unwrap();
        assert_eq!(only_text(&result).2, edited, "{uri} after edit");
    }
}

#[tokio::test]
async fn test_all_documents_resource() {
    let harness = TestHarness::new();
    let result = harness.dispatcher.read_resource(ALL_DOCS_URI).await.unwrap();
    let (_, _, text) = only_text(&result);

    let expected: String = [
        ("Payment Flow", "get_payment_flow.md"),
        ("API Specification", "get_api_specification.md"),
        ("Encryption Specification (mandatory)", "get_encryption_specification.md"),
        ("Signature Specification", "get_signature_guide.md"),
        ("Error Codes", "get_error_codes.md"),
    ]
    .iter()
    .map(|(title, file)| format!("# {title}\n{}\n", harness.read(file)))
    .collect();
    assert_eq!(text, expected);

    for (_, body) in GUIDES {
        assert_eq!(text.matches(body).count(), 1);
    }
}

#[tokio::test]
async fn test_missing_document_fails_resource() {
    let harness = TestHarness::new();
    harness.remove("get_signature_guide.md");

    let err = harness
        .dispatcher
        .read_resource("payment://docs/signature")
        .await
        .unwrap_err();
    assert!(err.message.contains("get_signature_guide.md"));

    let err = harness
        .dispatcher
        .read_resource(ALL_DOCS_URI)
        .await
        .unwrap_err();
    assert!(err.message.contains("get_signature_guide.md"));
    assert_eq!(
        err.data,
        Some(json!({"kind": "aggregation_failed", "capability": "resource"}))
    );
}

#[tokio::test]
async fn test_unknown_resource() {
    let harness = TestHarness::new();
    let err = harness
        .dispatcher
        .read_resource("payment://docs/refunds")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert_eq!(err.message, "Unknown resource: payment://docs/refunds");
}

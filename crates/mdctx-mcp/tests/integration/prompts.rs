//! Integration tests for the prompt surface.

use mdctx_mcp::table::{PAYMENT_CONTEXT_CLOSING, PAYMENT_CONTEXT_PREAMBLE};
use rmcp::model::{ErrorCode, PromptMessageRole};

use crate::common::{TestHarness, guide, prompt_text};

#[test]
fn test_list_prompts() {
    let harness = TestHarness::new();
    let result = harness.dispatcher.list_prompts();

    let names: Vec<&str> = result.prompts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "payment-api-context",
            "payment-api-spec-context",
            "payment-encryption-context",
            "payment-error-codes-context",
            "payment-signature-context",
        ]
    );
    assert!(result.prompts.iter().all(|p| p.description.is_some()));
    assert!(result.prompts.iter().all(|p| p.arguments.is_none()));
    assert_eq!(result, harness.dispatcher.list_prompts());
}

#[tokio::test]
async fn test_payment_api_context() {
    let harness = TestHarness::new();
    let result = harness
        .dispatcher
        .get_prompt("payment-api-context")
        .await
        .unwrap();

    assert_eq!(result.messages[0].role, PromptMessageRole::User);
    assert!(result.description.is_some());

    let text = prompt_text(&result);
    assert!(text.starts_with(PAYMENT_CONTEXT_PREAMBLE));
    assert!(text.ends_with(PAYMENT_CONTEXT_CLOSING));
    assert!(text.contains(&format!(
        "# Encryption Specification (mandatory)\n{}\n# API Specification\n",
        guide("get_encryption_specification.md")
    )));
}

#[tokio::test]
async fn test_single_document_prompts() {
    let harness = TestHarness::new();
    let cases = [
        (
            "payment-api-spec-context",
            "Payment API specification:\n",
            "get_api_specification.md",
        ),
        (
            "payment-encryption-context",
            "Encryption specification:\n",
            "get_encryption_specification.md",
        ),
        (
            "payment-error-codes-context",
            "Error codes:\n",
            "get_error_codes.md",
        ),
        (
            "payment-signature-context",
            "Signature guide:\n",
            "get_signature_guide.md",
        ),
    ];

    for (name, header, file) in cases {
        let result = harness.dispatcher.get_prompt(name).await.unwrap();
        assert_eq!(prompt_text(&result), format!("{header}{}", guide(file)), "{name}");
    }
}

#[tokio::test]
async fn test_prompt_with_missing_document() {
    let harness = TestHarness::new();
    harness.remove("get_error_codes.md");

    let err = harness
        .dispatcher
        .get_prompt("payment-error-codes-context")
        .await
        .unwrap_err();
    assert!(err.message.contains("get_error_codes.md"));

    // Prompts that do not use the file are unaffected.
    assert!(
        harness
            .dispatcher
            .get_prompt("payment-signature-context")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_unknown_prompt() {
    let harness = TestHarness::new();
    let err = harness.dispatcher.get_prompt("refund-context").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Unknown prompt: refund-context");
}

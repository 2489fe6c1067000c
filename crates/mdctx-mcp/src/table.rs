//! The payment API guides capability table.
//!
//! Two tools, five prompts, and six resources over the five documents of
//! [`DocumentCatalog::payment_guides`].

use mdctx_content::{AggregationRecipe, DocumentCatalog, DocumentKey};
use serde_json::json;

use crate::registry::{CapabilityAction, CapabilityDescriptor, CapabilityTable};

/// Header of the aggregate-everything tool and prompt.
pub const PAYMENT_CONTEXT_PREAMBLE: &str =
    "Essential context for implementing the payment API:\n\n";

/// Footer of the `payment-api-context` prompt.
pub const PAYMENT_CONTEXT_CLOSING: &str =
    "\nImplement secure payment processing that strictly follows the specifications above.";

/// Prefix of `read_markdown_file` output.
pub const READ_FILE_PREFIX: &str = "File contents:\n";

/// URI of the resource aggregating every guide.
pub const ALL_DOCS_URI: &str = "payment://docs/all";

/// Per-document metadata: key, resource URI, resource name, section title.
const GUIDES: [(&str, &str, &str, &str); 5] = [
    (
        "payment_flow",
        "payment://docs/flow",
        "Payment flow",
        "Payment Flow",
    ),
    (
        "api_spec",
        "payment://docs/api-spec",
        "API specification",
        "API Specification",
    ),
    (
        "encryption_spec",
        "payment://docs/encryption",
        "Encryption specification",
        "Encryption Specification (mandatory)",
    ),
    (
        "signature_guide",
        "payment://docs/signature",
        "Signature guide",
        "Signature Specification",
    ),
    (
        "error_codes",
        "payment://docs/error-codes",
        "Error codes",
        "Error Codes",
    ),
];

/// Section order of the aggregate-everything tool and prompt.
const CONTEXT_ORDER: [&str; 5] = [
    "encryption_spec",
    "api_spec",
    "error_codes",
    "payment_flow",
    "signature_guide",
];

/// Heading used for `key` in headed recipes.
pub fn section_title(key: &DocumentKey) -> Option<&'static str> {
    GUIDES
        .iter()
        .find(|(k, ..)| *k == key.as_str())
        .map(|(.., title)| *title)
}

/// Resource URI for `key`.
pub fn resource_uri(key: &DocumentKey) -> Option<&'static str> {
    GUIDES
        .iter()
        .find(|(k, ..)| *k == key.as_str())
        .map(|(_, uri, ..)| *uri)
}

fn payment_context_recipe() -> AggregationRecipe {
    CONTEXT_ORDER.iter().fold(
        AggregationRecipe::headed().with_header(PAYMENT_CONTEXT_PREAMBLE),
        |recipe, key| {
            let title = section_title(&DocumentKey::from(*key)).unwrap_or(*key);
            recipe.section(title, *key)
        },
    )
}

fn single_prompt(key: &str, header: &str) -> CapabilityAction {
    CapabilityAction::Aggregate(AggregationRecipe::single(key).with_header(header))
}

impl CapabilityTable {
    /// The fixed table served by `markdown-context-server`.
    ///
    /// The all-documents resource covers every key `catalog` binds, in
    /// catalog order.
    pub fn payment_docs(catalog: &DocumentCatalog) -> Self {
        let mut table = CapabilityTable::new()
            // -- Tools ----------------------------------------------------------
            .tool(
                "get_payment_context",
                CapabilityAction::Aggregate(payment_context_recipe()),
                CapabilityDescriptor::new(
                    "get_payment_context",
                    "Retrieve everything needed to implement the payment API, payment \
                     processing, and credit card payments: encryption specification, API \
                     specification, error codes, payment flow, and signature guide",
                )
                .with_input_schema(json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                })),
            )
            .tool(
                "read_markdown_file",
                CapabilityAction::ReadFile {
                    argument: "file_path".to_string(),
                    prefix: READ_FILE_PREFIX.to_string(),
                },
                CapabilityDescriptor::new("read_markdown_file", "Read the specified Markdown file")
                    .with_input_schema(json!({
                        "type": "object",
                        "properties": {
                            "file_path": {
                                "type": "string",
                                "description": "Path of the file to read"
                            }
                        },
                        "required": ["file_path"]
                    })),
            )
            // -- Prompts --------------------------------------------------------
            .prompt(
                "payment-api-context",
                CapabilityAction::Aggregate(
                    payment_context_recipe().with_footer(PAYMENT_CONTEXT_CLOSING),
                ),
                CapabilityDescriptor::new(
                    "payment-api-context",
                    "Complete context required when implementing the payment API",
                ),
            )
            .prompt(
                "payment-api-spec-context",
                single_prompt("api_spec", "Payment API specification:\n"),
                CapabilityDescriptor::new(
                    "payment-api-spec-context",
                    "Payment API specification details",
                ),
            )
            .prompt(
                "payment-encryption-context",
                single_prompt("encryption_spec", "Encryption specification:\n"),
                CapabilityDescriptor::new(
                    "payment-encryption-context",
                    "Detailed payment data encryption specification",
                ),
            )
            .prompt(
                "payment-error-codes-context",
                single_prompt("error_codes", "Error codes:\n"),
                CapabilityDescriptor::new(
                    "payment-error-codes-context",
                    "Payment error codes and how to handle them",
                ),
            )
            .prompt(
                "payment-signature-context",
                single_prompt("signature_guide", "Signature guide:\n"),
                CapabilityDescriptor::new(
                    "payment-signature-context",
                    "Implementation guide for payment request signatures",
                ),
            );

        // -- Resources ----------------------------------------------------------
        for (key, uri, name, _) in GUIDES {
            table = table.resource(
                uri,
                CapabilityAction::Aggregate(AggregationRecipe::single(key)),
                CapabilityDescriptor::new(name, format!("{name} guide for the payment API")),
            );
        }

        let all = AggregationRecipe::all_documents(catalog, |key| {
            section_title(key).map(str::to_string)
        });
        table.resource(
            ALL_DOCS_URI,
            CapabilityAction::Aggregate(all),
            CapabilityDescriptor::new(
                "All payment API guides",
                "Every payment API guide in one document",
            ),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

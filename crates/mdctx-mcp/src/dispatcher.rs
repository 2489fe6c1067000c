//! Capability dispatcher.
//!
//! Routes the six MCP request kinds to the registry and the aggregation
//! engine, and shapes each result into its response envelope. This is the
//! only place where [`mdctx_core::Error`] becomes [`ErrorData`].
//!
//! The dispatcher holds nothing but shared immutable state, so clones can
//! serve concurrent requests without locking.

use std::sync::Arc;

use mdctx_content::{AggregationEngine, DocumentStore};
use mdctx_core::{CapabilityKind, Error, Result};
use rmcp::model::{
    CallToolResult, Content, ErrorData, GetPromptResult, JsonObject, ListPromptsResult,
    ListResourcesResult, ListToolsResult, PromptMessage, PromptMessageRole, ReadResourceResult,
    ResourceContents,
};
use serde_json::Value;

use crate::error::McpErrorExt;
use crate::registry::{
    CapabilityAction, CapabilityEntry, CapabilityRegistry, CapabilityTable, MARKDOWN_MIME_TYPE,
};

/// Stateless router from requests to capability actions.
#[derive(Clone, Debug)]
pub struct CapabilityDispatcher {
    registry: Arc<CapabilityRegistry>,
    engine: AggregationEngine,
}

impl CapabilityDispatcher {
    /// Create a dispatcher over a built registry and a document store.
    pub fn new(registry: Arc<CapabilityRegistry>, store: Arc<DocumentStore>) -> Self {
        Self {
            registry,
            engine: AggregationEngine::new(store),
        }
    }

    /// Dispatcher for the payment guides table over `store`.
    ///
    /// Fails if the table references a key the store's catalog does not bind.
    pub fn payment_docs(store: DocumentStore) -> Result<Self> {
        let table = CapabilityTable::payment_docs(store.catalog());
        let registry = CapabilityRegistry::from_table(table, store.catalog())?;
        Ok(Self::new(Arc::new(registry), Arc::new(store)))
    }

    /// The registry requests are resolved against.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------------

    /// `tools/list`
    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult::with_all_items(
            self.registry
                .list(CapabilityKind::Tool)
                .map(CapabilityEntry::to_tool)
                .collect(),
        )
    }

    /// `tools/call`
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        log::info!("CallTool: {name}");
        let text = self
            .serve(CapabilityKind::Tool, name, arguments.as_ref())
            .await
            .map_err(|e| reject(CapabilityKind::Tool, name, e))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    // ------------------------------------------------------------------------
    // Prompts
    // ------------------------------------------------------------------------

    /// `prompts/list`
    pub fn list_prompts(&self) -> ListPromptsResult {
        ListPromptsResult::with_all_items(
            self.registry
                .list(CapabilityKind::Prompt)
                .map(CapabilityEntry::to_prompt)
                .collect(),
        )
    }

    /// `prompts/get`
    pub async fn get_prompt(&self, name: &str) -> std::result::Result<GetPromptResult, ErrorData> {
        log::info!("GetPrompt: {name}");
        let (description, text) = async {
            let entry = self.registry.resolve(CapabilityKind::Prompt, name)?;
            let text = self.run(entry, None).await?;
            Ok::<_, Error>((entry.descriptor.description.clone(), text))
        }
        .await
        .map_err(|e| reject(CapabilityKind::Prompt, name, e))?;

        Ok(GetPromptResult {
            description: Some(description),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// `resources/list`
    pub fn list_resources(&self) -> ListResourcesResult {
        ListResourcesResult::with_all_items(
            self.registry
                .list(CapabilityKind::Resource)
                .map(CapabilityEntry::to_resource)
                .collect(),
        )
    }

    /// `resources/read`
    pub async fn read_resource(
        &self,
        uri: &str,
    ) -> std::result::Result<ReadResourceResult, ErrorData> {
        log::info!("ReadResource: {uri}");
        let text = self
            .serve(CapabilityKind::Resource, uri, None)
            .await
            .map_err(|e| reject(CapabilityKind::Resource, uri, e))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(MARKDOWN_MIME_TYPE.to_string()),
                text,
                meta: None,
            }],
        })
    }

    // ------------------------------------------------------------------------
    // Shared path
    // ------------------------------------------------------------------------

    async fn serve(
        &self,
        kind: CapabilityKind,
        id: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<String> {
        let entry = self.registry.resolve(kind, id)?;
        self.run(entry, arguments).await
    }

    async fn run(&self, entry: &CapabilityEntry, arguments: Option<&JsonObject>) -> Result<String> {
        match &entry.action {
            CapabilityAction::Aggregate(recipe) => {
                Ok(self.engine.aggregate(recipe).await?.into_text())
            }
            CapabilityAction::ReadFile { argument, prefix } => {
                let path = arguments
                    .and_then(|args| args.get(argument))
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        Error::invalid_arguments(format!(
                            "'{}' requires a string argument '{argument}'",
                            entry.id
                        ))
                    })?;
                let content = self.engine.store().fetch_path(path).await?;
                Ok(format!("{prefix}{content}"))
            }
            CapabilityAction::StaticText(text) => Ok(text.clone()),
        }
    }
}

fn reject(kind: CapabilityKind, id: &str, error: Error) -> ErrorData {
    log::warn!(
        "{kind} '{id}' failed ({}): {error}",
        error.root_cause().kind_name()
    );
    error.to_mcp_error(kind)
}

// ============================================================================
// Tests
// ============================================================================

//! rmcp transport adapter.
//!
//! [`DocsMcpServer`] implements [`ServerHandler`] by delegating each request
//! to a [`CapabilityDispatcher`]. The SDK owns framing, sessions, and
//! cancellation: a cancelled request drops its in-flight future, so no
//! partial response is ever written.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, GetPromptRequestParams, GetPromptResult,
    Implementation, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ReadResourceRequestParams, ReadResourceResult,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};

use crate::dispatcher::CapabilityDispatcher;
use crate::error::{Error, Result};

/// Server metadata advertised during initialization.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Implementation name
    pub name: String,
    /// Implementation version
    pub version: String,
    /// Usage hints for the client
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "markdown-context-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

impl From<&mdctx_core::config::ServerSection> for ServerConfig {
    fn from(section: &mdctx_core::config::ServerSection) -> Self {
        Self {
            name: section.name.clone(),
            version: section.version.clone(),
            instructions: section.instructions.clone(),
        }
    }
}

/// MCP server serving the capabilities of one dispatcher.
#[derive(Clone, Debug)]
pub struct DocsMcpServer {
    dispatcher: CapabilityDispatcher,
    config: ServerConfig,
}

impl DocsMcpServer {
    /// Create a server with default metadata.
    pub fn new(dispatcher: CapabilityDispatcher) -> Self {
        Self {
            dispatcher,
            config: ServerConfig::default(),
        }
    }

    /// Replace all metadata.
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the advertised name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the advertised version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the instructions shown to clients.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    /// The dispatcher requests are routed to.
    pub fn dispatcher(&self) -> &CapabilityDispatcher {
        &self.dispatcher
    }

    /// Serve over stdin/stdout until the client closes the session.
    pub async fn serve_stdio(self) -> Result<()> {
        log::info!(
            "Serving {} v{} over stdio",
            self.config.name,
            self.config.version
        );
        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(Error::transport)?;
        let reason = service.waiting().await.map_err(Error::transport)?;
        log::info!("Session ended: {reason:?}");
        Ok(())
    }
}

impl ServerHandler for DocsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.name.clone(),
                title: None,
                version: self.config.version.clone(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: self.config.instructions.clone(),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(self.dispatcher.list_tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        self.dispatcher
            .call_tool(&request.name, request.arguments)
            .await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, ErrorData> {
        Ok(self.dispatcher.list_prompts())
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, ErrorData> {
        self.dispatcher.get_prompt(&request.name).await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, ErrorData> {
        Ok(self.dispatcher.list_resources())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, ErrorData> {
        self.dispatcher.read_resource(&request.uri).await
    }
}

// ============================================================================
// Tests
// ============================================================================

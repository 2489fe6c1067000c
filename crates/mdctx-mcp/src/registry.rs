//! Capability registry.
//!
//! A static, in-memory mapping from `(kind, identifier)` to a
//! [`CapabilityAction`] and its advertised [`CapabilityDescriptor`]. The
//! registry is built once from a [`CapabilityTable`] and never mutated
//! afterwards; adding a capability is a table change, not a code change.
//!
//! All recipe keys are checked against the document catalog at build time,
//! so an unbound key fails startup instead of a later request.

use std::collections::HashMap;
use std::sync::Arc;

use mdctx_content::{AggregationRecipe, DocumentCatalog};
use mdctx_core::{CapabilityKind, Error, Result};
use rmcp::model::{AnnotateAble, Prompt, RawResource, Resource, Tool};
use serde_json::{Map, Value};

/// Media type advertised and returned for every resource.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

// ============================================================================
// Actions and descriptors
// ============================================================================

/// What serving a capability does.
#[derive(Clone, Debug, PartialEq)]
pub enum CapabilityAction {
    /// Aggregate documents with a recipe. Valid for every kind.
    Aggregate(AggregationRecipe),
    /// Read the path passed in the string argument `argument`, returning
    /// `prefix` followed by the file text. Tools only.
    ReadFile {
        /// Name of the argument holding the path
        argument: String,
        /// Text placed before the file contents
        prefix: String,
    },
    /// Fixed instruction text with no document substitution. Prompts only.
    StaticText(String),
}

impl CapabilityAction {
    /// Short name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aggregate(_) => "aggregate",
            Self::ReadFile { .. } => "read_file",
            Self::StaticText(_) => "static_text",
        }
    }

    fn allowed_for(&self, kind: CapabilityKind) -> bool {
        match self {
            Self::Aggregate(_) => true,
            Self::ReadFile { .. } => kind == CapabilityKind::Tool,
            Self::StaticText(_) => kind == CapabilityKind::Prompt,
        }
    }
}

/// Static metadata advertised by the list operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapabilityDescriptor {
    /// Display name. Resources show it; tools and prompts use their id.
    pub name: String,
    /// Human description.
    pub description: String,
    /// JSON Schema of the call arguments (tools).
    pub input_schema: Option<Value>,
}

impl CapabilityDescriptor {
    /// Descriptor with a display name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Attach an input schema.
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// One registered capability.
#[derive(Clone, Debug, PartialEq)]
pub struct CapabilityEntry {
    /// Namespace
    pub kind: CapabilityKind,
    /// Tool name, prompt name, or resource URI
    pub id: String,
    /// Behavior on call/get/read
    pub action: CapabilityAction,
    /// Advertised metadata
    pub descriptor: CapabilityDescriptor,
}

impl CapabilityEntry {
    /// The entry as an MCP tool definition.
    pub fn to_tool(&self) -> Tool {
        let schema = self
            .descriptor
            .input_schema
            .clone()
            .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}}));
        Tool::new(
            self.id.clone(),
            self.descriptor.description.clone(),
            json_schema(schema),
        )
    }

    /// The entry as an MCP prompt definition (no arguments).
    pub fn to_prompt(&self) -> Prompt {
        Prompt::new(
            self.id.clone(),
            Some(self.descriptor.description.clone()),
            None,
        )
    }

    /// The entry as an MCP resource definition.
    pub fn to_resource(&self) -> Resource {
        let mut raw = RawResource::new(self.id.clone(), self.descriptor.name.clone());
        raw.description = Some(self.descriptor.description.clone());
        raw.mime_type = Some(MARKDOWN_MIME_TYPE.to_string());
        raw.no_annotation()
    }
}

fn json_schema(value: Value) -> Arc<Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

// ============================================================================
// CapabilityTable
// ============================================================================

/// Declarative list of capabilities, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct CapabilityTable {
    entries: Vec<CapabilityEntry>,
}

impl CapabilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a tool.
    pub fn tool(
        self,
        name: impl Into<String>,
        action: CapabilityAction,
        descriptor: CapabilityDescriptor,
    ) -> Self {
        self.declare(CapabilityKind::Tool, name, action, descriptor)
    }

    /// Declare a prompt.
    pub fn prompt(
        self,
        name: impl Into<String>,
        action: CapabilityAction,
        descriptor: CapabilityDescriptor,
    ) -> Self {
        self.declare(CapabilityKind::Prompt, name, action, descriptor)
    }

    /// Declare a resource.
    pub fn resource(
        self,
        uri: impl Into<String>,
        action: CapabilityAction,
        descriptor: CapabilityDescriptor,
    ) -> Self {
        self.declare(CapabilityKind::Resource, uri, action, descriptor)
    }

    fn declare(
        mut self,
        kind: CapabilityKind,
        id: impl Into<String>,
        action: CapabilityAction,
        descriptor: CapabilityDescriptor,
    ) -> Self {
        self.entries.push(CapabilityEntry {
            kind,
            id: id.into(),
            action,
            descriptor,
        });
        self
    }

    /// Declared entries.
    pub fn entries(&self) -> &[CapabilityEntry] {
        &self.entries
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// CapabilityRegistry
// ============================================================================

/// Immutable lookup from `(kind, id)` to a capability.
#[derive(Debug)]
pub struct CapabilityRegistry {
    catalog: DocumentCatalog,
    entries: Vec<CapabilityEntry>,
    index: HashMap<(CapabilityKind, String), usize>,
}

impl CapabilityRegistry {
    /// Create an empty registry validating recipes against `catalog`.
    pub fn new(catalog: DocumentCatalog) -> Self {
        Self {
            catalog,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a registry from every entry of `table`.
    ///
    /// Fails on the first invalid entry.
    pub fn from_table(table: CapabilityTable, catalog: &DocumentCatalog) -> Result<Self> {
        let mut registry = Self::new(catalog.clone());
        for entry in table.entries {
            registry.register(entry.kind, entry.id, entry.action, entry.descriptor)?;
        }
        log::debug!(
            "Registered {} tools, {} prompts, {} resources",
            registry.count(CapabilityKind::Tool),
            registry.count(CapabilityKind::Prompt),
            registry.count(CapabilityKind::Resource)
        );
        Ok(registry)
    }

    /// Register one capability.
    ///
    /// Rejects a duplicate `(kind, id)`, an action the kind cannot carry,
    /// and recipes that reference keys missing from the catalog.
    pub fn register(
        &mut self,
        kind: CapabilityKind,
        id: impl Into<String>,
        action: CapabilityAction,
        descriptor: CapabilityDescriptor,
    ) -> Result<()> {
        let id = id.into();
        let slot = (kind, id.clone());
        if self.index.contains_key(&slot) {
            return Err(Error::DuplicateCapability { kind, id });
        }

        if !action.allowed_for(kind) {
            return Err(Error::config(format!(
                "{kind} '{id}' cannot use the {} action",
                action.name()
            )));
        }

        if let CapabilityAction::Aggregate(recipe) = &action
            && let Some(key) = recipe.keys().find(|key| !self.catalog.contains(key))
        {
            return Err(Error::config(format!(
                "{kind} '{id}' references unbound document key '{key}'"
            )));
        }

        self.index.insert(slot, self.entries.len());
        self.entries.push(CapabilityEntry {
            kind,
            id,
            action,
            descriptor,
        });
        Ok(())
    }

    /// Look up a capability.
    pub fn resolve(&self, kind: CapabilityKind, id: &str) -> Result<&CapabilityEntry> {
        self.index
            .get(&(kind, id.to_string()))
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::unknown(kind, id))
    }

    /// Entries of `kind` in declaration order.
    pub fn list(&self, kind: CapabilityKind) -> impl Iterator<Item = &CapabilityEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Number of entries of `kind`.
    pub fn count(&self, kind: CapabilityKind) -> usize {
        self.list(kind).count()
    }

    /// The catalog recipes were validated against.
    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Capability kinds exposed to MCP clients.

use std::fmt;

/// The namespace a capability identifier lives in.
///
/// Identifiers are unique within a kind, not across kinds: a tool and a
/// prompt may share a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// An invocable action (`tools/call`).
    Tool,
    /// A canned instruction template (`prompts/get`).
    Prompt,
    /// An addressable read-only document (`resources/read`).
    Resource,
}

impl CapabilityKind {
    /// All kinds, in listing order.
    pub const ALL: [CapabilityKind; 3] = [Self::Tool, Self::Prompt, Self::Resource];

    /// Lowercase name used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Prompt => "prompt",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

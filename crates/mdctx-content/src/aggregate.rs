//! Aggregation engine.
//!
//! Fetches every section of a recipe concurrently, then renders them in
//! declared order. Aggregation is all-or-nothing: if any section fails, the
//! first failing section in recipe order is reported and nothing is
//! rendered.

use std::sync::Arc;

use futures::future::join_all;
use mdctx_core::{Error, Result};

use crate::catalog::DocumentKey;
use crate::recipe::AggregationRecipe;
use crate::store::DocumentStore;

/// The rendered result of one aggregation. Never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeDocument {
    text: String,
    sections: Vec<(String, DocumentKey)>,
}

impl CompositeDocument {
    /// Full rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume into the rendered text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of rendered sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Section titles in render order.
    pub fn section_titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(title, _)| title.as_str())
    }

    /// Section keys in render order.
    pub fn section_keys(&self) -> impl Iterator<Item = &DocumentKey> {
        self.sections.iter().map(|(_, key)| key)
    }
}

/// Builds composite documents from recipes.
#[derive(Clone, Debug)]
pub struct AggregationEngine {
    store: Arc<DocumentStore>,
}

impl AggregationEngine {
    /// Create an engine reading through `store`.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Fetch and render every section of `recipe`.
    pub async fn aggregate(&self, recipe: &AggregationRecipe) -> Result<CompositeDocument> {
        let fetches = recipe.keys().map(|key| self.store.fetch(key));
        let results = join_all(fetches).await;

        let mut bodies = Vec::with_capacity(results.len());
        for (section, result) in recipe.sections().iter().zip(results) {
            match result {
                Ok(body) => bodies.push(body),
                Err(e) => {
                    log::warn!("Aggregation aborted at '{}': {e}", section.key);
                    return Err(Error::aggregation_failed(section.key.as_str(), e));
                }
            }
        }

        let mut text = String::from(recipe.header());
        for (section, body) in recipe.sections().iter().zip(&bodies) {
            text.push_str(&recipe.render_section(section, body));
        }
        text.push_str(recipe.footer());

        log::debug!(
            "Aggregated {} sections ({} bytes)",
            recipe.sections().len(),
            text.len()
        );

        Ok(CompositeDocument {
            text,
            sections: recipe
                .sections()
                .iter()
                .map(|s| (s.title.clone(), s.key.clone()))
                .collect(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

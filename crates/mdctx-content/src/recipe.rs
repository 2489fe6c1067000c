//! Aggregation recipes.
//!
//! A recipe is an ordered list of `(title, key)` sections plus an optional
//! header and footer. Section order is the render order.

use crate::catalog::{DocumentCatalog, DocumentKey};

/// How each section body is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SectionStyle {
    /// `"# {title}\n{content}\n"` per section.
    #[default]
    Headed,
    /// Content verbatim; titles are not rendered.
    Bare,
}

/// One titled document slot in a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Heading shown above the document in headed recipes.
    pub title: String,
    /// Document to fetch.
    pub key: DocumentKey,
}

/// Ordered sections plus header/footer text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregationRecipe {
    header: String,
    sections: Vec<Section>,
    footer: String,
    style: SectionStyle,
}

impl AggregationRecipe {
    /// Empty recipe rendering `# title` headings.
    pub fn headed() -> Self {
        Self::default()
    }

    /// Empty recipe rendering bodies verbatim.
    pub fn bare() -> Self {
        Self {
            style: SectionStyle::Bare,
            ..Self::default()
        }
    }

    /// A single document, verbatim, with no header or footer.
    ///
    /// Rendering yields exactly the document's bytes.
    pub fn single(key: impl Into<DocumentKey>) -> Self {
        let key = key.into();
        Self::bare().section(key.as_str().to_string(), key)
    }

    /// Every document of `catalog`, headed, in catalog order.
    ///
    /// Titles come from `title_for`, falling back to the key.
    pub fn all_documents<F>(catalog: &DocumentCatalog, title_for: F) -> Self
    where
        F: Fn(&DocumentKey) -> Option<String>,
    {
        catalog.keys().fold(Self::headed(), |recipe, key| {
            let title = title_for(key).unwrap_or_else(|| key.to_string());
            recipe.section(title, key.clone())
        })
    }

    /// Append a section.
    pub fn section(mut self, title: impl Into<String>, key: impl Into<DocumentKey>) -> Self {
        self.sections.push(Section {
            title: title.into(),
            key: key.into(),
        });
        self
    }

    /// Text placed before the first section.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Text placed after the last section.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Sections in declared order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Document keys in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &DocumentKey> {
        self.sections.iter().map(|s| &s.key)
    }

    /// Header text (may be empty).
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Footer text (may be empty).
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// Section style.
    pub fn style(&self) -> SectionStyle {
        self.style
    }

    /// Render one section body according to the style.
    pub fn render_section(&self, section: &Section, content: &str) -> String {
        match self.style {
            SectionStyle::Headed => format!("# {}\n{content}\n", section.title),
            SectionStyle::Bare => content.to_string(),
        }
    }
}

//! Section element
//!
//! A section line marks the structure of the tune: named parts with an optional
//! repeat count, arrows between them and free commentary.
//!
//! Example source line and the resulting items:
//!
//! ```text
//! - [Verse] x2 -> then [Chorus] fade out
//!
//! Name("Verse", 2), Arrow, Comment("then"), Name("Chorus"), Comment("fade out")
//! ```

use super::super::traits::AstNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionItem {
    Name { text: String, repeat: Option<u32> },
    Arrow,
    Comment(String),
}

impl SectionItem {
    pub fn name(text: impl Into<String>, repeat: Option<u32>) -> Self {
        SectionItem::Name {
            text: text.into(),
            repeat,
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        SectionItem::Comment(text.into())
    }
}

impl AstNode for SectionItem {
    fn node_type(&self) -> &'static str {
        match self {
            SectionItem::Name { .. } => "Name",
            SectionItem::Arrow => "Arrow",
            SectionItem::Comment(_) => "Comment",
        }
    }

    fn display_label(&self) -> String {
        match self {
            SectionItem::Name {
                text,
                repeat: Some(n),
            } => format!("{text} x{n}"),
            SectionItem::Name { text, repeat: None } => text.clone(),
            SectionItem::Arrow => "->".to_string(),
            SectionItem::Comment(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn new(items: Vec<SectionItem>) -> Self {
        Self { items }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            SectionItem::Name { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl AstNode for Section {
    fn node_type(&self) -> &'static str {
        "Section"
    }

    fn display_label(&self) -> String {
        match self.items.len() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }

    fn children(&self) -> Vec<&dyn AstNode> {
        self.items.iter().map(|i| i as &dyn AstNode).collect()
    }
}

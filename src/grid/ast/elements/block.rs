//! Top-level blocks
//!
//! Every non-metadata source line produces exactly one block. Lines that match
//! no grammar rule become `Block::Unrecognized`, so a faulty line is kept in the
//! output instead of aborting the compilation.

use super::super::traits::AstNode;
use super::measure::Measure;
use super::section::Section;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Section(Section),
    GridRow(GridRow),
    Vspace(Vspace),
    /// A line that is already markup, passed through verbatim
    RawTag(String),
    /// A line matching none of the line grammars
    Unrecognized(String),
}

impl Block {
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Block::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_grid_row(&self) -> Option<&GridRow> {
        match self {
            Block::GridRow(row) => Some(row),
            _ => None,
        }
    }
}

impl AstNode for Block {
    fn node_type(&self) -> &'static str {
        match self {
            Block::Section(section) => section.node_type(),
            Block::GridRow(row) => row.node_type(),
            Block::Vspace(vspace) => vspace.node_type(),
            Block::RawTag(_) => "RawTag",
            Block::Unrecognized(_) => "Unrecognized",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Block::Section(section) => section.display_label(),
            Block::GridRow(row) => row.display_label(),
            Block::Vspace(vspace) => vspace.display_label(),
            Block::RawTag(text) | Block::Unrecognized(text) => text.clone(),
        }
    }

    fn children(&self) -> Vec<&dyn AstNode> {
        match self {
            Block::Section(section) => section.children(),
            Block::GridRow(row) => row.children(),
            Block::Vspace(_) | Block::RawTag(_) | Block::Unrecognized(_) => Vec::new(),
        }
    }
}

/// One line of measures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridRow {
    pub measures: Vec<Measure>,
}

impl GridRow {
    pub fn new(measures: Vec<Measure>) -> Self {
        Self { measures }
    }
}

impl AstNode for GridRow {
    fn node_type(&self) -> &'static str {
        "GridRow"
    }

    fn display_label(&self) -> String {
        match self.measures.len() {
            1 => "1 measure".to_string(),
            n => format!("{n} measures"),
        }
    }

    fn children(&self) -> Vec<&dyn AstNode> {
        self.measures.iter().map(|m| m as &dyn AstNode).collect()
    }
}

/// Vertical spacing directive. An empty kind means the default spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vspace {
    pub kind: String,
}

impl Vspace {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl AstNode for Vspace {
    fn node_type(&self) -> &'static str {
        "Vspace"
    }

    fn display_label(&self) -> String {
        if self.kind.is_empty() {
            "default".to_string()
        } else {
            self.kind.clone()
        }
    }
}

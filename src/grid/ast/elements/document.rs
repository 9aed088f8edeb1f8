//! Document element
//!
//! The document node is the root of the grid tree. It carries:
//! - Header metadata (title, subtitle, author, copyright), filled from
//!   metadata lines. A later line for the same field replaces the earlier one.
//! - The ordered list of blocks, in source order.

use super::block::{Block, GridRow};
use super::section::Section;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            metadata: Metadata::default(),
            blocks,
        }
    }

    pub fn iter_grid_rows(&self) -> impl Iterator<Item = &GridRow> {
        self.blocks.iter().filter_map(|block| block.as_grid_row())
    }

    pub fn iter_sections(&self) -> impl Iterator<Item = &Section> {
        self.blocks.iter().filter_map(|block| block.as_section())
    }

    /// Source lines that matched no grammar rule
    pub fn unrecognized_lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Unrecognized(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.metadata.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_is_empty() {
        let metadata = Metadata {
            copyright: Some("1963".to_string()),
            ..Metadata::default()
        };

        assert!(!metadata.is_empty());
        assert!(Metadata::default().is_empty());
    }

    #[test]
    fn test_unrecognized_lines() {
        let doc = Document::with_blocks(vec![
            Block::RawTag("<hr>".to_string()),
            Block::Unrecognized("???".to_string()),
        ]);

        assert_eq!(doc.unrecognized_lines().collect::<Vec<_>>(), vec!["???"]);
        assert!(!doc.is_empty());
        assert!(Document::new().is_empty());
    }
}

//! Treeviz formatter for grid documents
//!
//! One line per node, with the nesting drawn as a tree. Handy for checking how
//! a row was split into measures and how chords were grouped.
//!
//! The format is:
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example, for `# Blues` followed by `| C7 | F7 |`:
//!
//! ```text
//! ⧉ Blues
//! └─ ☰ 2 measures
//!   ├─ ▭ normal
//!   │ ├─ ‖ plain
//!   │ └─ ♫ 1 chord
//!   │   └─ ♪ C7
//!   └─ ▭ normal
//!     ├─ ‖ plain
//!     ├─ ♫ 1 chord
//!     │ └─ ♪ F7
//!     └─ ‖ plain
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Section: §   Name: ◆   Arrow: →   Comment: ✎
//!     GridRow: ☰   Measure: ▭
//!     Barline: ‖   Repeat: :   Time: ♩   Pause: ─   Pentagram: ≡
//!     ChordGroup: ♫   Chord: ♪
//!     Vspace: ↕   RawTag: ⟨⟩   Unrecognized: ✗

use super::registry::{FormatError, Formatter};
use crate::grid::ast::{AstNode, Document};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Section" => "§",
        "Name" => "◆",
        "Arrow" => "→",
        "Comment" => "✎",
        "GridRow" => "☰",
        "Measure" => "▭",
        "Barline" => "‖",
        "Repeat" => ":",
        "Time" => "♩",
        "Pause" => "─",
        "Pentagram" => "≡",
        "ChordGroup" => "♫",
        "Chord" => "♪",
        "Vspace" => "↕",
        "RawTag" => "⟨⟩",
        "Unrecognized" => "✗",
        _ => "○",
    }
}

fn format_node(node: &dyn AstNode, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(node.node_type()),
        truncate(&node.display_label(), MAX_LABEL_CHARS)
    ));

    let children = node.children();
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_node(child, &child_prefix, i + 1 == child_count, output);
    }
}

/// Render the document tree, one node per line
pub fn to_treeviz_str(doc: &Document) -> String {
    let title = doc.metadata.title.as_deref().unwrap_or("Untitled");
    let mut output = format!(
        "{} {}\n",
        get_icon("Document"),
        truncate(title, MAX_LABEL_CHARS)
    );

    let block_count = doc.blocks.len();
    for (i, block) in doc.blocks.iter().enumerate() {
        format_node(block, "", i + 1 == block_count, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with Unicode icons"
    }
}

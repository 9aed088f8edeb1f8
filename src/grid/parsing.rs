//! Line parser
//!
//! Consumes a grid source one line at a time and builds a [`Document`]:
//!
//! 1. Strip the trailing comment (`//` to end of line, `\//` is a literal).
//! 2. Skip lines left empty.
//! 3. Classify the trimmed line with [`grammar::classify_line`] and route it:
//!    metadata lines update the document header, section lines go to
//!    [`section::parse_section`], grid rows go to [`row::parse_row`], raw tags
//!    and unrecognized lines become leaf blocks.
//!
//! Parsing never fails. A line that matches no grammar rule is kept as
//! [`Block::Unrecognized`] and the following lines are parsed normally.

pub mod row;
pub mod section;

use crate::grid::ast::{Block, Document, Vspace};
use crate::grid::grammar::{self, LineKind};
use std::borrow::Cow;

pub use row::parse_row;
pub use section::parse_section;

/// Parse a sequence of source lines into a document.
///
/// Lines may keep their line terminators; surrounding whitespace is ignored.
pub fn parse<I, S>(lines: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut doc = Document::new();
    for line in lines {
        parse_line(&mut doc, line.as_ref());
    }
    doc
}

/// Parse a whole source text
pub fn parse_str(source: &str) -> Document {
    parse(source.lines())
}

fn parse_line(doc: &mut Document, raw: &str) {
    let without_comment = strip_comment(raw);
    let line = without_comment.trim();
    if line.is_empty() {
        return;
    }

    let Some(matched) = grammar::classify_line(line) else {
        doc.blocks.push(Block::Unrecognized(line.to_string()));
        return;
    };

    let text = matched.text.trim();
    match matched.kind {
        LineKind::Title => doc.metadata.title = Some(text.to_string()),
        LineKind::Subtitle => doc.metadata.subtitle = Some(text.to_string()),
        LineKind::Author => doc.metadata.author = Some(text.to_string()),
        LineKind::Copyright => doc.metadata.copyright = Some(text.to_string()),
        LineKind::Vspace => doc
            .blocks
            .push(Block::Vspace(Vspace::new(text.to_lowercase()))),
        LineKind::Section => doc.blocks.push(Block::Section(parse_section(text))),
        LineKind::GridRow => doc.blocks.push(Block::GridRow(parse_row(line))),
        LineKind::RawTag => doc.blocks.push(Block::RawTag(line.to_string())),
    }
}

/// Remove everything from the first unescaped `//` to the end of the line.
///
/// An escaped `\//` stays in the line as a plain `//`.
pub fn strip_comment(line: &str) -> Cow<'_, str> {
    if !line.contains("//") {
        return Cow::Borrowed(line);
    }

    let mut kept = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(pos) = rest.find("//") {
        let (before, after) = rest.split_at(pos);
        match before.strip_suffix('\\') {
            Some(escaped) => {
                kept.push_str(escaped);
                kept.push_str("//");
                rest = &after[2..];
            }
            None => {
                kept.push_str(before);
                return Cow::Owned(kept);
            }
        }
    }
    kept.push_str(rest);
    Cow::Owned(kept)
}

//! Section line parser
//!
//! Builds a [`Section`] from the text after the leading `-`. Words that are
//! neither a name nor an arrow are buffered and flushed as one comment when a
//! name or an arrow follows, or at the end of the line. A comment therefore
//! never spans a name or an arrow, but may span several words.

use crate::grid::ast::{Section, SectionItem};
use crate::grid::grammar::{self, SectionAtom};

pub fn parse_section(text: &str) -> Section {
    let mut items = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for atom in grammar::section_atoms(text) {
        match grammar::classify_section_atom(atom) {
            SectionAtom::Name { text, repeat } => {
                flush_comment(&mut pending, &mut items);
                items.push(SectionItem::name(text, repeat));
            }
            SectionAtom::Arrow => {
                flush_comment(&mut pending, &mut items);
                items.push(SectionItem::Arrow);
            }
            SectionAtom::Word(word) => pending.push(word),
        }
    }
    flush_comment(&mut pending, &mut items);

    Section::new(items)
}

fn flush_comment(pending: &mut Vec<&str>, items: &mut Vec<SectionItem>) {
    if !pending.is_empty() {
        items.push(SectionItem::comment(pending.join(" ")));
        pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_repeat_arrow_comment() {
        let section = parse_section("[Verse] x2 -> some notes");
        assert_eq!(
            section.items,
            vec![
                SectionItem::name("Verse", Some(2)),
                SectionItem::Arrow,
                SectionItem::comment("some notes"),
            ]
        );
    }

    #[test]
    fn test_comment_is_flushed_before_name() {
        let section = parse_section("play   softly [Bridge] then loud");
        assert_eq!(
            section.items,
            vec![
                SectionItem::comment("play softly"),
                SectionItem::name("Bridge", None),
                SectionItem::comment("then loud"),
            ]
        );
    }

    #[test]
    fn test_names_and_arrows_only() {
        let section = parse_section("[A]x2 -> [B] -> [A]");
        assert_eq!(
            section.items,
            vec![
                SectionItem::name("A", Some(2)),
                SectionItem::Arrow,
                SectionItem::name("B", None),
                SectionItem::Arrow,
                SectionItem::name("A", None),
            ]
        );
        assert_eq!(section.names().collect::<Vec<_>>(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_empty_section() {
        assert!(parse_section("").items.is_empty());
        assert!(parse_section("   ").items.is_empty());
    }

    #[test]
    fn test_detached_repeat_after_comment_stays_comment() {
        let section = parse_section("intro x2");
        assert_eq!(section.items, vec![SectionItem::comment("intro x2")]);
    }
}

//! Declarative grammar for the grid notation
//!
//! Each level of the notation is classified by an ordered table of regex rules:
//!
//! 1. Lines: title, subtitle, author, copyright, vspace, section, grid-row,
//!    raw-tag. Anything else is unrecognized.
//! 2. Measure atoms: repeat, barline, time, case, pause, pentagram, empty chord,
//!    same-measure, size. Anything else is a chord.
//! 3. Section atoms: name (with optional repeat), arrow. Anything else is
//!    commentary.
//!
//! Tables are tried in declaration order and the first match wins. The order is
//! part of the grammar: `-4-` must be tried as a pause before `-` as an empty
//! chord, and `## x` must not be read as a title.
//!
//! Every pattern is anchored and matches a whole line or a whole atom.

use crate::grid::ast::{BarlineKind, MeasureSize};
use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};

/// Kinds of recognized source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Subtitle,
    Author,
    Copyright,
    Vspace,
    Section,
    GridRow,
    RawTag,
}

/// Line grammar, in match order. Capture group 1 (when present) is the payload.
const LINE_PATTERNS: &[(LineKind, &str)] = &[
    (LineKind::Title, r"^#([^#]+)$"),
    (LineKind::Subtitle, r"^##([^#]+)$"),
    (LineKind::Author, r"^(?i:author:)(.+)$"),
    (LineKind::Copyright, r"^(?i:copyright:)(.+)$"),
    (LineKind::Vspace, r"^%vspace-?(.*)%$"),
    (LineKind::Section, r"^-(.*)$"),
    (LineKind::GridRow, r"^(?:\d+/\d+)?\s*[|\[\]](?:.*[|\[\]])?$"),
    (LineKind::RawTag, r"^<.*>$"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomRule {
    Repeat,
    Barline,
    Time,
    Case,
    Pause,
    Pentagram,
    EmptyChord,
    SameMeasure,
    Size,
}

/// Measure atom grammar, in match order. Unmatched atoms are chords.
const ATOM_PATTERNS: &[(AtomRule, &str)] = &[
    (AtomRule::Repeat, r"^:$"),
    (AtomRule::Barline, r"^(:)?([|\[\]])(:)?$"),
    (AtomRule::Time, r"^(\d+)/(\d+)$"),
    (AtomRule::Case, r"^\((.*)\)$"),
    (AtomRule::Pause, r"^-(\d+)-$"),
    (AtomRule::Pentagram, r"^==+$"),
    (AtomRule::EmptyChord, r"^-$"),
    (AtomRule::SameMeasure, r"^%$"),
    (AtomRule::Size, r"^\.([lLsS])$"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionRule {
    Name,
    Arrow,
}

/// Section atom grammar, in match order. Unmatched atoms are commentary.
const SECTION_PATTERNS: &[(SectionRule, &str)] = &[
    (SectionRule::Name, r"^\[(.*?)\](?:\s*x(\d+))?$"),
    (SectionRule::Arrow, r"^->$"),
];

static LINE_RULES: Lazy<Vec<(LineKind, Regex)>> = Lazy::new(|| compile(LINE_PATTERNS));
static ATOM_RULES: Lazy<Vec<(AtomRule, Regex)>> = Lazy::new(|| compile(ATOM_PATTERNS));
static SECTION_RULES: Lazy<Vec<(SectionRule, Regex)>> = Lazy::new(|| compile(SECTION_PATTERNS));

/// One measure: optional time prefix, a delimiter, then everything up to the
/// next delimiter
static MEASURE_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\d+/\d+\s*)?[|\[\]][^|\[\]]*").unwrap());

/// Parenthesized case text, kept as one atom with its inner spaces
static CASE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// A delimiter with the repeat colons attached to either side
static DELIMITER_PIECE: Lazy<Regex> = Lazy::new(|| Regex::new(r":?[|\[\]]:?").unwrap());

/// A bracketed name with its repeat suffix, or any whitespace-free word
static SECTION_ATOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\](?:\s*x\d+\b)?|\S+").unwrap());

fn compile<K: Copy>(patterns: &[(K, &str)]) -> Vec<(K, Regex)> {
    patterns
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).unwrap()))
        .collect()
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> Option<&'h str> {
    caps.get(index).map(|m| m.as_str())
}

/// A classified line and its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub kind: LineKind,
    /// The captured payload (e.g. the title text), or the whole line for
    /// grid rows and raw tags. Not trimmed.
    pub text: &'a str,
}

/// Classify a trimmed, comment-free line. `None` means unrecognized.
pub fn classify_line(line: &str) -> Option<LineMatch<'_>> {
    LINE_RULES.iter().find_map(|(kind, regex)| {
        regex.captures(line).map(|caps| LineMatch {
            kind: *kind,
            text: group(&caps, 1).unwrap_or(line),
        })
    })
}

/// A classified measure atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom<'a> {
    Repeat,
    Barline {
        leading_repeat: bool,
        kind: BarlineKind,
        trailing_repeat: bool,
    },
    Time {
        divisions: &'a str,
        value: &'a str,
    },
    Case(&'a str),
    Pause(&'a str),
    Pentagram,
    EmptyChord,
    SameMeasure,
    Size(MeasureSize),
    Chord(&'a str),
}

impl AtomRule {
    fn build<'a>(self, caps: &Captures<'a>, atom: &'a str) -> Atom<'a> {
        match self {
            AtomRule::Repeat => Atom::Repeat,
            AtomRule::Barline => {
                let kind = group(caps, 2)
                    .and_then(|d| d.chars().next())
                    .and_then(BarlineKind::from_delimiter)
                    .unwrap_or(BarlineKind::Plain);
                Atom::Barline {
                    leading_repeat: caps.get(1).is_some(),
                    kind,
                    trailing_repeat: caps.get(3).is_some(),
                }
            }
            AtomRule::Time => Atom::Time {
                divisions: group(caps, 1).unwrap_or_default(),
                value: group(caps, 2).unwrap_or_default(),
            },
            AtomRule::Case => Atom::Case(group(caps, 1).unwrap_or_default()),
            AtomRule::Pause => Atom::Pause(group(caps, 1).unwrap_or_default()),
            AtomRule::Pentagram => Atom::Pentagram,
            AtomRule::EmptyChord => Atom::EmptyChord,
            AtomRule::SameMeasure => Atom::SameMeasure,
            AtomRule::Size => match group(caps, 1) {
                Some("l") | Some("L") => Atom::Size(MeasureSize::Long),
                Some("s") | Some("S") => Atom::Size(MeasureSize::Short),
                _ => Atom::Chord(atom),
            },
        }
    }
}

/// Classify one measure atom. Never fails: unmatched atoms are chords.
pub fn classify_atom(atom: &str) -> Atom<'_> {
    ATOM_RULES
        .iter()
        .find_map(|(rule, regex)| regex.captures(atom).map(|caps| rule.build(&caps, atom)))
        .unwrap_or(Atom::Chord(atom))
}

/// A classified section atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAtom<'a> {
    Name {
        text: &'a str,
        repeat: Option<u32>,
    },
    Arrow,
    Word(&'a str),
}

/// Classify one section atom. Never fails: unmatched atoms are words.
pub fn classify_section_atom(atom: &str) -> SectionAtom<'_> {
    SECTION_RULES
        .iter()
        .find_map(|(rule, regex)| {
            regex.captures(atom).map(|caps| match rule {
                SectionRule::Name => SectionAtom::Name {
                    text: group(&caps, 1).unwrap_or_default(),
                    repeat: group(&caps, 2).and_then(|n| n.parse().ok()),
                },
                SectionRule::Arrow => SectionAtom::Arrow,
            })
        })
        .unwrap_or(SectionAtom::Word(atom))
}

/// Measure fragments of a grid-row line, before the closing-delimiter merge
pub fn measure_fragments(line: &str) -> impl Iterator<Item = Match<'_>> {
    MEASURE_FRAGMENT.find_iter(line)
}

/// Parenthesized case runs of a measure fragment
pub fn case_runs(fragment: &str) -> impl Iterator<Item = Match<'_>> {
    CASE_RUN.find_iter(fragment)
}

/// Split a whitespace-free word so that delimiters stand alone.
///
/// A colon next to a delimiter belongs to the delimiter (`G7:|` is `G7` then
/// `:|`); the text between delimiters is kept whole.
pub fn atom_pieces(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut cursor = 0;
    for delimiter in DELIMITER_PIECE.find_iter(word) {
        if delimiter.start() > cursor {
            pieces.push(&word[cursor..delimiter.start()]);
        }
        pieces.push(delimiter.as_str());
        cursor = delimiter.end();
    }
    if cursor < word.len() {
        pieces.push(&word[cursor..]);
    }
    pieces
}

/// Atoms of a section line
pub fn section_atoms(text: &str) -> impl Iterator<Item = &str> {
    SECTION_ATOM.find_iter(text).map(|m| m.as_str())
}

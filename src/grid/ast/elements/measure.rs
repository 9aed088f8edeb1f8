//! Measure elements
//!
//! A measure (bar-block) is one rhythmic unit of a grid row: an optional case
//! label, a size hint and the bar holding the actual symbols.
//!
//! Chord-like symbols are never stored directly in a bar. [`Bar::push_chord`]
//! appends them to a trailing [`BarElement::ChordGroup`] or opens a new one, and
//! every other element closes the open group simply by becoming the last
//! element. The resulting invariant is that a bar never holds two adjacent
//! chord groups (see [`Bar::is_well_grouped`]).

use super::super::traits::AstNode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureSize {
    #[default]
    Normal,
    Long,
    Short,
}

impl MeasureSize {
    pub fn name(&self) -> &'static str {
        match self {
            MeasureSize::Normal => "normal",
            MeasureSize::Long => "long",
            MeasureSize::Short => "short",
        }
    }
}

/// Alternate-ending or annotation text attached to a measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseLabel {
    pub text: String,
}

impl CaseLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// First/second-time endings start with `1` or `2` (optionally followed by
    /// periods, as in `1.` or `2..`).
    pub fn is_ending(&self) -> bool {
        matches!(self.text.chars().next(), Some('1' | '2'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarlineKind {
    Plain,
    DoubleStart,
    DoubleEnd,
}

impl BarlineKind {
    pub fn from_delimiter(delimiter: char) -> Option<Self> {
        match delimiter {
            '|' => Some(BarlineKind::Plain),
            '[' => Some(BarlineKind::DoubleStart),
            ']' => Some(BarlineKind::DoubleEnd),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarlineKind::Plain => "plain",
            BarlineKind::DoubleStart => "double-start",
            BarlineKind::DoubleEnd => "double-end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chord {
    Named(String),
    /// An empty chord slot
    Empty,
    /// Repeat the previous chord, written `%`
    SameMeasure,
}

impl Chord {
    pub fn named(text: impl Into<String>) -> Self {
        Chord::Named(text.into())
    }
}

impl AstNode for Chord {
    fn node_type(&self) -> &'static str {
        "Chord"
    }

    fn display_label(&self) -> String {
        match self {
            Chord::Named(text) => text.clone(),
            Chord::Empty => "(empty)".to_string(),
            Chord::SameMeasure => "%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarElement {
    Barline(BarlineKind),
    Repeat,
    Time { divisions: String, value: String },
    Pause { count: String },
    Pentagram,
    ChordGroup(Vec<Chord>),
}

impl BarElement {
    pub fn is_chord_group(&self) -> bool {
        matches!(self, BarElement::ChordGroup(_))
    }
}

impl AstNode for BarElement {
    fn node_type(&self) -> &'static str {
        match self {
            BarElement::Barline(_) => "Barline",
            BarElement::Repeat => "Repeat",
            BarElement::Time { .. } => "Time",
            BarElement::Pause { .. } => "Pause",
            BarElement::Pentagram => "Pentagram",
            BarElement::ChordGroup(_) => "ChordGroup",
        }
    }

    fn display_label(&self) -> String {
        match self {
            BarElement::Barline(kind) => kind.name().to_string(),
            BarElement::Repeat => ":".to_string(),
            BarElement::Time { divisions, value } => format!("{divisions}/{value}"),
            BarElement::Pause { count } => count.clone(),
            BarElement::Pentagram => "===".to_string(),
            BarElement::ChordGroup(chords) => match chords.len() {
                1 => "1 chord".to_string(),
                n => format!("{n} chords"),
            },
        }
    }

    fn children(&self) -> Vec<&dyn AstNode> {
        match self {
            BarElement::ChordGroup(chords) => chords.iter().map(|c| c as &dyn AstNode).collect(),
            _ => Vec::new(),
        }
    }
}

/// The ordered symbols of one measure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bar {
    elements: Vec<BarElement>,
}

impl Bar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. Chord groups are merged chord by chord so that the
    /// grouping invariant holds whatever the caller passes in.
    pub fn push(&mut self, element: BarElement) {
        match element {
            BarElement::ChordGroup(chords) => {
                for chord in chords {
                    self.push_chord(chord);
                }
            }
            other => self.elements.push(other),
        }
    }

    /// Append a chord to the trailing chord group, opening one if needed
    pub fn push_chord(&mut self, chord: Chord) {
        match self.elements.last_mut() {
            Some(BarElement::ChordGroup(group)) => group.push(chord),
            _ => self.elements.push(BarElement::ChordGroup(vec![chord])),
        }
    }

    pub fn elements(&self) -> &[BarElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn chord_groups(&self) -> impl Iterator<Item = &[Chord]> {
        self.elements.iter().filter_map(|element| match element {
            BarElement::ChordGroup(chords) => Some(chords.as_slice()),
            _ => None,
        })
    }

    /// No two chord groups are adjacent and no group is empty
    pub fn is_well_grouped(&self) -> bool {
        let no_adjacent = self
            .elements
            .windows(2)
            .all(|pair| !(pair[0].is_chord_group() && pair[1].is_chord_group()));
        no_adjacent && self.chord_groups().all(|group| !group.is_empty())
    }
}

impl FromIterator<BarElement> for Bar {
    fn from_iter<T: IntoIterator<Item = BarElement>>(iter: T) -> Self {
        let mut bar = Bar::new();
        for element in iter {
            bar.push(element);
        }
        bar
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Measure {
    pub size: MeasureSize,
    pub case_label: Option<CaseLabel>,
    pub bar: Bar,
}

impl Measure {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AstNode for Measure {
    fn node_type(&self) -> &'static str {
        "Measure"
    }

    fn display_label(&self) -> String {
        match &self.case_label {
            Some(case) => format!("{} ({})", self.size.name(), case.text),
            None => self.size.name().to_string(),
        }
    }

    fn children(&self) -> Vec<&dyn AstNode> {
        self.bar
            .elements()
            .iter()
            .map(|e| e as &dyn AstNode)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_chords_share_a_group() {
        let mut bar = Bar::new();
        bar.push_chord(Chord::named("C"));
        bar.push_chord(Chord::Empty);
        bar.push_chord(Chord::SameMeasure);

        assert_eq!(
            bar.elements(),
            &[BarElement::ChordGroup(vec![
                Chord::named("C"),
                Chord::Empty,
                Chord::SameMeasure
            ])]
        );
    }

    #[test]
    fn test_non_chord_element_closes_group() {
        let mut bar = Bar::new();
        bar.push_chord(Chord::named("C"));
        bar.push(BarElement::Repeat);
        bar.push_chord(Chord::named("G"));

        assert_eq!(bar.len(), 3);
        assert_eq!(bar.chord_groups().count(), 2);
        assert!(bar.is_well_grouped());
    }

    #[test]
    fn test_pushing_a_group_extends_the_trailing_group() {
        let mut bar = Bar::new();
        bar.push_chord(Chord::named("Am"));
        bar.push(BarElement::ChordGroup(vec![Chord::named("F"), Chord::named("G")]));

        assert_eq!(bar.len(), 1);
        assert!(bar.is_well_grouped());
        assert_eq!(bar.chord_groups().next().map(|g| g.len()), Some(3));
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let bar: Bar = vec![BarElement::ChordGroup(vec![]), BarElement::Pentagram]
            .into_iter()
            .collect();

        assert_eq!(bar.elements(), &[BarElement::Pentagram]);
    }

    #[test]
    fn test_case_label_endings() {
        assert!(CaseLabel::new("1.").is_ending());
        assert!(CaseLabel::new("2").is_ending());
        assert!(CaseLabel::new("2..").is_ending());
        assert!(!CaseLabel::new("3.").is_ending());
        assert!(!CaseLabel::new("Coda").is_ending());
        assert!(!CaseLabel::new("").is_ending());
    }

    #[test]
    fn test_barline_kind_from_delimiter() {
        assert_eq!(BarlineKind::from_delimiter('|'), Some(BarlineKind::Plain));
        assert_eq!(
            BarlineKind::from_delimiter('['),
            Some(BarlineKind::DoubleStart)
        );
        assert_eq!(BarlineKind::from_delimiter(']'), Some(BarlineKind::DoubleEnd));
        assert_eq!(BarlineKind::from_delimiter(':'), None);
    }
}

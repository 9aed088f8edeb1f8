//! Grid row parser
//!
//! A grid-row line is turned into measures in three steps:
//!
//! 1. Measure splitting. Each fragment is an optional time prefix, one
//!    delimiter (`|`, `[` or `]`) and the text up to the next delimiter. The
//!    line ends with a delimiter, so the last fragment is only the closing
//!    barline: it is merged into the fragment before it. A row with a single
//!    fragment has nothing to merge.
//! 2. Atom extraction. Parenthesized case text is one atom (inner spaces kept);
//!    the rest is split on whitespace, and delimiters glued to a chord are split
//!    off into their own atom.
//! 3. Atom classification with [`grammar::classify_atom`], applied in order to
//!    the measure under construction.
//!
//! Example:
//!
//! ```text
//! 4/4 [: C  -2- | (1.) G7 :] (2.) G7 % |
//!
//! "4/4 [: C  -2- " -> Time, Barline, Repeat, ChordGroup[C], Pause   (short)
//! "| (1.) G7 :"     -> Barline, ChordGroup[G7], Repeat             case "1."
//! "] (2.) G7 % |"   -> Barline, ChordGroup[G7, %], Barline         case "2."
//! ```

use crate::grid::ast::{BarElement, CaseLabel, Chord, GridRow, Measure, MeasureSize};
use crate::grid::grammar::{self, Atom};

/// Parse a grid-row line into its measures
pub fn parse_row(line: &str) -> GridRow {
    GridRow::new(split_measures(line).into_iter().map(parse_measure).collect())
}

/// Split a grid-row line into one fragment per measure.
///
/// The trailing closing-delimiter fragment is merged into the previous one.
/// With fewer than two fragments nothing is merged.
pub fn split_measures(line: &str) -> Vec<&str> {
    let mut spans: Vec<(usize, usize)> = grammar::measure_fragments(line)
        .map(|m| (m.start(), m.end()))
        .collect();

    if spans.len() >= 2 {
        if let Some((_, closing_end)) = spans.pop() {
            if let Some(last) = spans.last_mut() {
                last.1 = closing_end;
            }
        }
    }

    spans
        .into_iter()
        .map(|(start, end)| &line[start..end])
        .collect()
}

/// Split a measure fragment into atoms, in source order
pub fn split_atoms(fragment: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut cursor = 0;
    for case in grammar::case_runs(fragment) {
        push_words(&fragment[cursor..case.start()], &mut atoms);
        atoms.push(case.as_str());
        cursor = case.end();
    }
    push_words(&fragment[cursor..], &mut atoms);
    atoms
}

fn push_words<'a>(text: &'a str, atoms: &mut Vec<&'a str>) {
    for word in text.split_whitespace() {
        atoms.extend(grammar::atom_pieces(word));
    }
}

/// Build one measure from its fragment
pub fn parse_measure(fragment: &str) -> Measure {
    let mut measure = Measure::new();
    for atom in split_atoms(fragment) {
        apply_atom(&mut measure, grammar::classify_atom(atom));
    }
    measure
}

fn apply_atom(measure: &mut Measure, atom: Atom<'_>) {
    let bar = &mut measure.bar;
    match atom {
        Atom::Repeat => bar.push(BarElement::Repeat),
        Atom::Barline {
            leading_repeat,
            kind,
            trailing_repeat,
        } => {
            if leading_repeat {
                bar.push(BarElement::Repeat);
            }
            bar.push(BarElement::Barline(kind));
            if trailing_repeat {
                bar.push(BarElement::Repeat);
            }
        }
        Atom::Time { divisions, value } => bar.push(BarElement::Time {
            divisions: divisions.to_string(),
            value: value.to_string(),
        }),
        Atom::Case(text) => measure.case_label = Some(CaseLabel::new(text)),
        Atom::Pause(count) => {
            bar.push(BarElement::Pause {
                count: count.to_string(),
            });
            measure.size = MeasureSize::Short;
        }
        Atom::Pentagram => {
            bar.push(BarElement::Pentagram);
            bar.push_chord(Chord::Empty);
        }
        Atom::EmptyChord => bar.push_chord(Chord::Empty),
        Atom::SameMeasure => bar.push_chord(Chord::SameMeasure),
        Atom::Size(size) => measure.size = size,
        Atom::Chord(text) => bar.push_chord(Chord::named(text)),
    }
}

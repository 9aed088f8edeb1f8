//! Parser behavior over whole sources

use musicgrid::grid::ast::{
    BarElement, BarlineKind, Block, CaseLabel, Chord, MeasureSize, SectionItem,
};
use musicgrid::{parse, parse_str};
use rstest::rstest;

#[test]
fn title_line_sets_metadata() {
    let doc = parse(["# My Tune"]);
    assert_eq!(doc.metadata.title.as_deref(), Some("My Tune"));
    assert!(doc.blocks.is_empty());
}

#[test]
fn section_line_items() {
    let doc = parse(["- [Verse] x2 -> some notes"]);
    let section = doc.iter_sections().next().expect("one section");
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
fn trailing_delimiter_merges_into_last_measure() {
    let doc = parse(["|C G|Am F|"]);
    let row = doc.iter_grid_rows().next().expect("one row");
    assert_eq!(row.measures.len(), 2);

    for measure in &row.measures {
        let elements = measure.bar.elements();
        assert_eq!(elements[0], BarElement::Barline(BarlineKind::Plain));
        assert!(elements[1].is_chord_group());
        assert_eq!(measure.bar.chord_groups().count(), 1);
    }
    assert_eq!(
        row.measures[1].bar.elements(),
        &[
            BarElement::Barline(BarlineKind::Plain),
            BarElement::ChordGroup(vec![Chord::named("Am"), Chord::named("F")]),
            BarElement::Barline(BarlineKind::Plain),
        ]
    );
}

#[rstest]
#[case("| -4- |", MeasureSize::Short)]
#[case("| -4- .l |", MeasureSize::Long)]
#[case("| C .s |", MeasureSize::Short)]
#[case("| C |", MeasureSize::Normal)]
fn measure_size(#[case] line: &str, #[case] expected: MeasureSize) {
    let doc = parse([line]);
    let row = doc.iter_grid_rows().next().expect("one row");
    assert_eq!(row.measures[0].size, expected);
}

#[test]
fn pause_count_is_kept() {
    let doc = parse(["| -4- |"]);
    let row = doc.iter_grid_rows().next().expect("one row");
    assert!(row.measures[0].bar.elements().contains(&BarElement::Pause {
        count: "4".to_string()
    }));
}

#[rstest]
#[case("| (2.) C |", "2.", true)]
#[case("| (1.) C |", "1.", true)]
#[case("| (Coda) C |", "Coda", false)]
#[case("| (to coda) C |", "to coda", false)]
fn case_labels(#[case] line: &str, #[case] text: &str, #[case] ending: bool) {
    let doc = parse([line]);
    let row = doc.iter_grid_rows().next().expect("one row");
    let case = row.measures[0].case_label.as_ref().expect("case label");
    assert_eq!(case, &CaseLabel::new(text));
    assert_eq!(case.is_ending(), ending);
}

#[test]
fn unrecognized_line_does_not_stop_parsing() {
    let doc = parse(["???", "| C |", "# After"]);
    assert_eq!(doc.blocks[0], Block::Unrecognized("???".to_string()));
    assert_eq!(doc.iter_grid_rows().count(), 1);
    assert_eq!(doc.metadata.title.as_deref(), Some("After"));
}

#[test]
fn parse_is_deterministic() {
    let source = "# Tune\n- [A] x2\n4/4 [: C | G7 :]\n%vspace%\n<hr>\nwhat\n";
    assert_eq!(parse_str(source), parse_str(source));
}

#[test]
fn full_tune() {
    let source = "\
# Autumn Leaves
## Medium swing
author: J. Kosma
copyright: 1945 Enoch

- [A] x2 -> melody on top
4/4 [: Cm7 | F7 | Bbmaj7 | Ebmaj7 |
| Am7b5 | D7 | (1.) Gm | % :]
| (2.) Gm | - | === | -2- |  // ending
%vspace-large%
- [B]
| Am7b5 | D7 | Gm | Gm |
";
    let doc = parse_str(source);

    assert_eq!(doc.metadata.subtitle.as_deref(), Some("Medium swing"));
    assert_eq!(doc.metadata.copyright.as_deref(), Some("1945 Enoch"));
    assert_eq!(doc.unrecognized_lines().count(), 0);
    assert_eq!(doc.iter_sections().count(), 2);

    let rows: Vec<_> = doc.iter_grid_rows().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].measures.len(), 4);
    assert_eq!(
        rows[0].measures[0].bar.elements()[..3],
        [
            BarElement::Time {
                divisions: "4".to_string(),
                value: "4".to_string()
            },
            BarElement::Barline(BarlineKind::DoubleStart),
            BarElement::Repeat,
        ]
    );

    let last_of_second = &rows[1].measures[3];
    assert_eq!(
        last_of_second.bar.elements(),
        &[
            BarElement::Barline(BarlineKind::Plain),
            BarElement::ChordGroup(vec![Chord::SameMeasure]),
            BarElement::Repeat,
            BarElement::Barline(BarlineKind::DoubleEnd),
        ]
    );

    let ending = &rows[2].measures;
    assert_eq!(ending.len(), 4);
    assert!(ending[0].case_label.as_ref().is_some_and(CaseLabel::is_ending));
    assert_eq!(
        ending[2].bar.elements(),
        &[
            BarElement::Barline(BarlineKind::Plain),
            BarElement::Pentagram,
            BarElement::ChordGroup(vec![Chord::Empty]),
        ]
    );
    assert_eq!(ending[3].size, MeasureSize::Short);
    assert!(rows.iter().all(|row| row.measures.iter().all(|m| m.bar.is_well_grouped())));
}

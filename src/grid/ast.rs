//! Abstract syntax tree for chord grids
//!
//! The tree is a closed set of node types:
//!
//! ```text
//! Document
//!   ├─ Metadata (title, subtitle, author, copyright)
//!   └─ Block*
//!        ├─ Section ── SectionItem* (Name | Arrow | Comment)
//!        ├─ GridRow ── Measure* ── CaseLabel? + Bar ── BarElement*
//!        │                                             └─ ChordGroup ── Chord*
//!        ├─ Vspace
//!        ├─ RawTag
//!        └─ Unrecognized
//! ```
//!
//! Nodes are built once by the parser and only read afterwards.

pub mod elements;
pub mod traits;

pub use elements::{
    Bar, BarElement, BarlineKind, Block, CaseLabel, Chord, Document, GridRow, Measure,
    MeasureSize, Metadata, Section, SectionItem, Vspace,
};
pub use traits::AstNode;

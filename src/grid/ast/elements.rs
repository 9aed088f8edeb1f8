//! Element definitions for the grid AST

pub mod block;
pub mod document;
pub mod measure;
pub mod section;

pub use block::{Block, GridRow, Vspace};
pub use document::{Document, Metadata};
pub use measure::{Bar, BarElement, BarlineKind, CaseLabel, Chord, Measure, MeasureSize};
pub use section::{Section, SectionItem};

//! Chord grid notation
//!
//! A grid source is line oriented. Every line is classified on its own:
//!
//! ```text
//! # Title                  ## Subtitle
//! author: Name             copyright: Year Owner
//! - [Verse] x2 -> notes    section line
//! 4/4 | C | Am | F | G |   grid row
//! %vspace-large%           vertical space
//! <div class="x"></div>    raw markup, passed through
//! ```
//!
//! [`parsing`] turns the lines into an [`ast::Document`] and [`formats`]
//! serializes it, HTML being the main output.

pub mod ast;
pub mod formats;
pub mod grammar;
pub mod parsing;

pub use formats::render;
pub use parsing::{parse, parse_str};

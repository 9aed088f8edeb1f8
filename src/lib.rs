//! # musicgrid
//!
//! Compiles plain-text chord grids into standalone HTML pages.
//!
//! The core is pure: [`parse`] never fails (lines it cannot read become
//! `Unrecognized` blocks) and [`render`] never fails. The remaining modules are
//! the glue around it: configuration, file compilation, the polling watcher
//! and the live-reload server used by the `musicgrid` binary.

pub mod compile;
pub mod config;
pub mod error;
pub mod grid;
pub mod serve;
pub mod watch;

pub use error::{Error, Result};
pub use grid::{parse, parse_str, render};

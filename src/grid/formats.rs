//! Output format implementations for grid documents
//!
//! - `html`: the rendered page (the compiler's real output)
//! - `treeviz`: one line per node, for inspecting the parse tree
//! - `json`: the tree serialized with serde

pub mod html;
pub mod json;
pub mod registry;
pub mod treeviz;

pub use html::{escape_html, render, HtmlRenderer};
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};

//! Output formats by name
//!
//! `--format` and [`crate::compile::Compiler::compile_source`] pick a format by
//! its name. Each format is a [`Formatter`]; the [`FormatRegistry`] maps names
//! to formatters and lists them in name order for `--list-formats`.

use crate::grid::ast::Document;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
    #[error("could not serialize document: {0}")]
    Serialization(String),
}

pub trait Formatter: Send + Sync {
    /// Name used to select the format, e.g. `"treeviz"`
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    /// One line shown by `--list-formats`
    fn description(&self) -> &str {
        ""
    }
}

#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// An empty registry. Most callers want [`FormatRegistry::with_defaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The html, json and treeviz formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::HtmlRenderer::default());
        registry.register(super::JsonFormatter);
        registry.register(super::TreevizFormatter);
        registry
    }

    /// Add a formatter under its own name. A second formatter with the same
    /// name replaces the first.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let name = formatter.name().to_string();
        self.formatters.insert(name, Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|formatter| formatter.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, doc: &Document, name: &str) -> Result<String, FormatError> {
        match self.get(name) {
            Some(formatter) => formatter.serialize(doc),
            None => Err(FormatError::UnknownFormat(name.to_string())),
        }
    }

    /// Registered names, in alphabetical order
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}

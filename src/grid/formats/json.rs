//! JSON formatter
//!
//! Dumps the parsed tree with serde, for tooling that wants the structure
//! without scraping the HTML.

use super::registry::{FormatError, Formatter};
use crate::grid::ast::Document;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "Parse tree as pretty-printed JSON"
    }
}

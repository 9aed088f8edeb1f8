//! File compilation
//!
//! Reads a grid source, parses it and writes the rendered page. This is the
//! only place where the pure core meets the filesystem, so it is also where
//! unrecognized lines get reported.

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::grid::ast::Document;
use crate::grid::formats::{FormatRegistry, HtmlRenderer};
use crate::grid::parsing::parse_str;
use log::{info, warn};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    renderer: HtmlRenderer,
    live_address: Option<String>,
}

impl Compiler {
    pub fn new(renderer: HtmlRenderer) -> Self {
        Self {
            renderer,
            live_address: None,
        }
    }

    /// Build a compiler from the `[output]` settings, loading the custom
    /// stylesheet if one is configured.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        let renderer = match config.output.stylesheet_path() {
            Some(path) => HtmlRenderer::with_stylesheet(read_source(path)?),
            None => HtmlRenderer::default(),
        };
        Ok(Self::new(renderer))
    }

    /// Embed the live-reload script pointing at `address` in every page
    pub fn with_live_address(mut self, address: impl Into<String>) -> Self {
        self.live_address = Some(address.into());
        self
    }

    pub fn live_address(&self) -> Option<&str> {
        self.live_address.as_deref()
    }

    /// Compile `input` into the HTML page at `output`
    pub fn compile_file(&self, input: &Path, output: &Path) -> Result<Document> {
        let source = read_source(input)?;
        let doc = parse_str(&source);
        for line in doc.unrecognized_lines() {
            warn!("{}: unrecognized line: {}", input.display(), line);
        }

        let html = self.renderer.render_document(&doc, self.live_address());
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(output, html).map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })?;

        info!("compiled {} -> {}", input.display(), output.display());
        Ok(doc)
    }

    /// Compile source text into any registered format. `html` goes through
    /// this compiler's renderer so the stylesheet and live address apply.
    pub fn compile_source(&self, source: &str, format: &str) -> Result<String> {
        let doc = parse_str(source);
        if format == "html" {
            return Ok(self.renderer.render_document(&doc, self.live_address()));
        }
        Ok(FormatRegistry::with_defaults().serialize(&doc, format)?)
    }
}

/// Read a UTF-8 text file
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Loader;
    use tempfile::tempdir;

    #[test]
    fn test_compile_file_writes_page() {
        let dir = tempdir().expect("temp dir");
        let input = dir.path().join("song.grid");
        let output = dir.path().join("out").join("song.html");
        fs::write(&input, "# Song\n| C | G |\nnonsense\n").expect("write source");

        let doc = Compiler::default()
            .compile_file(&input, &output)
            .expect("compiles");

        assert_eq!(doc.metadata.title.as_deref(), Some("Song"));
        assert_eq!(doc.unrecognized_lines().count(), 1);
        let html = fs::read_to_string(&output).expect("output written");
        assert!(html.contains("<h1>Song</h1>"));
        assert!(html.contains("SyntaxError: \"nonsense\""));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempdir().expect("temp dir");
        let result =
            Compiler::default().compile_file(&dir.path().join("nope.grid"), &dir.path().join("x"));
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_compile_source_formats() {
        let compiler = Compiler::default().with_live_address("http://localhost:8001");

        let html = compiler.compile_source("| C |", "html").expect("html");
        assert!(html.contains("var server_address = \"http://localhost:8001\";"));

        let tree = compiler.compile_source("| C |", "treeviz").expect("treeviz");
        assert!(tree.starts_with("⧉ Untitled\n"));

        let err = compiler.compile_source("| C |", "pdf").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_from_config_loads_stylesheet() {
        let dir = tempdir().expect("temp dir");
        let css = dir.path().join("grid.css");
        fs::write(&css, ".chord { color: teal; }").expect("write css");

        let config = Loader::new()
            .set_override("output.stylesheet", css.to_string_lossy().to_string())
            .expect("override")
            .build()
            .expect("config");
        let compiler = Compiler::from_config(&config).expect("compiler");

        let html = compiler.compile_source("", "html").expect("html");
        assert!(html.contains(".chord { color: teal; }"));
    }

    #[test]
    fn test_from_config_missing_stylesheet_fails() {
        let config = Loader::new()
            .set_override("output.stylesheet", "/nonexistent/grid.css")
            .expect("override")
            .build()
            .expect("config");
        assert!(matches!(
            Compiler::from_config(&config),
            Err(Error::Read { .. })
        ));
    }
}

//! HTML rendering
//!
//! Serializes a grid document into a complete HTML page:
//!
//! ```text
//! <!DOCTYPE html> ... <style>STYLESHEET</style> ... <div class="page">
//! <div class="header"> title, subtitle, author </div>
//! blocks, in order
//! <div class="footer"> copyright </div>
//! </div> [live-reload script] </body></html>
//! ```
//!
//! # Data Model
//!
//! | Node | HTML |
//! |------|------|
//! | GridRow | `<div class="grid-row">` |
//! | Measure | `<div class="bar-block">`, plus `long` / `short` |
//! | CaseLabel | `<div class="case">`, plus `case-start` for 1st/2nd endings |
//! | Bar | `<div class="bar">` |
//! | ChordGroup | `<div class="chords">` |
//! | Chord | `<div class="chord">`, `chord same-bar` for `%` |
//! | Barline | `<div class="barline">`, plus `double-start` / `double-end` |
//! | Repeat, Time, Pause, Pentagram | `<div class="repeat">`, `time`, `pause`, `pentagram` |
//! | Vspace | `<div class="vspace">` or `<div class="vspace-KIND">` |
//! | Section | `<section class="tune-section">` |
//! | Name, Arrow, Comment | `<p class="name">` (+ `<p class="repeats">`), `<p class="arrow">`, `<span class="note">` |
//! | RawTag | verbatim |
//! | Unrecognized | `<span class="error">` |
//!
//! Containers put each child on its own lines, indented by one tab. Source text
//! is escaped, except raw tags. Rendering cannot fail.

use super::registry::{FormatError, Formatter};
use crate::grid::ast::{
    Bar, BarElement, BarlineKind, Block, CaseLabel, Chord, Document, Measure, MeasureSize,
    Metadata, SectionItem,
};
use std::borrow::Cow;

const DEFAULT_STYLESHEET: &str = include_str!("../../../resources/musicgrid.css");
const LIVE_RELOAD_SCRIPT: &str = include_str!("../../../resources/musicgrid.js");

/// HTML renderer carrying the stylesheet embedded in every page
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    stylesheet: Cow<'static, str>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            stylesheet: Cow::Borrowed(DEFAULT_STYLESHEET),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom stylesheet, embedded verbatim
    pub fn with_stylesheet(stylesheet: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
        }
    }

    /// Render a complete page. With a live address, the page polls
    /// `<address>/is_changed/` and reloads itself when the source changes.
    pub fn render_document(&self, doc: &Document, live_address: Option<&str>) -> String {
        let mut parts = Vec::with_capacity(doc.blocks.len() + 4);
        parts.push(self.preamble());
        parts.push(render_header(&doc.metadata));
        parts.extend(doc.blocks.iter().map(render_block));
        if let Some(copyright) = &doc.metadata.copyright {
            parts.push(leaf(
                "div",
                "footer",
                &format!("&copy; {}", escape_html(copyright)),
            ));
        }
        parts.push(postamble(live_address));
        parts.join("\n")
    }

    fn preamble(&self) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\" dir=\"ltr\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <style>\n{}\n</style>\n\
             </head>\n\
             <body>\n\
             <div class=\"page\">",
            self.stylesheet.trim_end()
        )
    }
}

impl Formatter for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.render_document(doc, None))
    }

    fn description(&self) -> &str {
        "HTML page with the embedded stylesheet"
    }
}

/// Render a document with the bundled stylesheet
pub fn render(doc: &Document, live_address: Option<&str>) -> String {
    HtmlRenderer::default().render_document(doc, live_address)
}

fn postamble(live_address: Option<&str>) -> String {
    let mut out = String::from("</div>\n");
    if let Some(address) = live_address {
        out.push_str(&live_reload_script(address));
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn live_reload_script(address: &str) -> String {
    // a JSON string is a valid JS string literal; `</` would close the script
    let literal = serde_json::to_string(address)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    format!(
        "<script type=\"text/javascript\">\nvar server_address = {};\n{}\n</script>",
        literal,
        LIVE_RELOAD_SCRIPT.trim_end()
    )
}

fn render_header(metadata: &Metadata) -> String {
    let mut fields = Vec::new();
    if let Some(title) = &metadata.title {
        fields.push(leaf("h1", "", &escape_html(title)));
    }
    if let Some(subtitle) = &metadata.subtitle {
        fields.push(leaf("h2", "", &escape_html(subtitle)));
    }
    if let Some(author) = &metadata.author {
        fields.push(leaf("p", "author", &escape_html(author)));
    }
    container("div", "header", fields)
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Section(section) => container(
            "section",
            "tune-section",
            section.items.iter().map(render_section_item),
        ),
        Block::GridRow(row) => container("div", "grid-row", row.measures.iter().map(render_measure)),
        Block::Vspace(vspace) => {
            let class = if vspace.kind.is_empty() {
                "vspace".to_string()
            } else {
                format!("vspace-{}", escape_html(&vspace.kind))
            };
            leaf("div", &class, "")
        }
        Block::RawTag(text) => text.clone(),
        Block::Unrecognized(text) => leaf(
            "span",
            "error",
            &format!("SyntaxError: \"{}\"", escape_html(text)),
        ),
    }
}

fn render_section_item(item: &SectionItem) -> String {
    match item {
        SectionItem::Name { text, repeat } => {
            let name = leaf("p", "name", &escape_html(text));
            match repeat {
                Some(n) => format!("{}\n{}", name, leaf("p", "repeats", &format!("x{n}"))),
                None => name,
            }
        }
        SectionItem::Arrow => leaf("p", "arrow", "&rarr;"),
        SectionItem::Comment(text) => leaf("span", "note", &escape_html(text)),
    }
}

fn render_measure(measure: &Measure) -> String {
    let class = match measure.size {
        MeasureSize::Normal => "bar-block".to_string(),
        size => format!("bar-block {}", size.name()),
    };
    let case = measure.case_label.as_ref().map(render_case);
    container(
        "div",
        &class,
        case.into_iter().chain(std::iter::once(render_bar(&measure.bar))),
    )
}

fn render_case(case: &CaseLabel) -> String {
    let class = if case.is_ending() {
        "case case-start"
    } else {
        "case"
    };
    leaf("div", class, &escape_html(&case.text))
}

fn render_bar(bar: &Bar) -> String {
    container("div", "bar", bar.elements().iter().map(render_bar_element))
}

fn render_bar_element(element: &BarElement) -> String {
    match element {
        BarElement::Barline(kind) => {
            let class = match kind {
                BarlineKind::Plain => "barline",
                BarlineKind::DoubleStart => "barline double-start",
                BarlineKind::DoubleEnd => "barline double-end",
            };
            leaf("div", class, "")
        }
        BarElement::Repeat => leaf("div", "repeat", ":"),
        BarElement::Time { divisions, value } => leaf(
            "div",
            "time",
            &format!("<span>{divisions}</span><span>{value}</span>"),
        ),
        BarElement::Pause { count } => leaf(
            "div",
            "pause",
            &format!(
                "<div class=\"pause-line\"></div>\
                 <div class=\"pause-number\">{count}</div>\
                 <div class=\"pause-line\"></div>"
            ),
        ),
        BarElement::Pentagram => leaf(
            "div",
            "pentagram",
            &"<div class=\"pentagram-line\"></div>".repeat(5),
        ),
        BarElement::ChordGroup(chords) => {
            container("div", "chords", chords.iter().map(render_chord))
        }
    }
}

fn render_chord(chord: &Chord) -> String {
    match chord {
        Chord::Named(text) => leaf("div", "chord", &escape_html(text)),
        Chord::Empty => leaf("div", "chord", ""),
        Chord::SameMeasure => leaf("div", "chord same-bar", "%"),
    }
}

fn open_tag(tag: &str, class: &str) -> String {
    if class.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} class=\"{class}\">")
    }
}

/// A single-line element
fn leaf(tag: &str, class: &str, inner: &str) -> String {
    format!("{}{}</{}>", open_tag(tag, class), inner, tag)
}

/// An element whose children each start on a new line, indented by one tab
fn container<I>(tag: &str, class: &str, children: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = open_tag(tag, class);
    out.push('\n');
    for child in children {
        for line in child.lines() {
            out.push('\t');
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

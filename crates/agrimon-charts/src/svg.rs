//! Minimal SVG document writer.

use crate::mapper::format_coord;
use std::fmt::Write as _;

/// Escape text for use inside SVG elements and attribute values.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Accumulates SVG elements into a standalone document.
#[derive(Debug)]
pub struct SvgDocument {
    body: String,
}

impl SvgDocument {
    /// Start a document of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        Self { body }
    }

    /// Straight one-pixel line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            format_coord(x1),
            format_coord(y1),
            format_coord(x2),
            format_coord(y2),
            escape_text(color)
        );
    }

    /// Unfilled two-pixel path.
    pub fn path(&mut self, data: &str, color: &str) {
        let _ = writeln!(
            self.body,
            r#"  <path d="{data}" stroke="{}" stroke-width="2" fill="none"/>"#,
            escape_text(color)
        );
    }

    /// Text anchored at (`x`, `y`).
    pub fn text(&mut self, x: f64, y: f64, anchor: &str, color: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{}" y="{}" text-anchor="{anchor}" fill="{}" font-size="12">{}</text>"#,
            format_coord(x),
            format_coord(y),
            escape_text(color),
            escape_text(content)
        );
    }

    /// Small legend bar.
    pub fn swatch(&mut self, x: f64, y: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"  <rect x="{}" y="{}" width="16" height="4" fill="{}"/>"#,
            format_coord(x),
            format_coord(y),
            escape_text(color)
        );
    }

    /// Close the root element and return the document.
    pub fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

//! Table markup serialization.
//!
//! Walks a structure token sequence and fills each empty-cell placeholder
//! with the matching cell content, producing an HTML table prefixed with a
//! style block. [`strip_style`] undoes the decoration for spreadsheet
//! exporters that only understand the bare `<table>` element.

use crate::config::{LayoutConfig, DEFAULT_TABLE_STYLE};
use crate::error::{Error, Result};
use crate::table::tokens::{count_placeholders, StructureToken};

const DOCUMENT_OPEN: &str = "<html><body>";
const DOCUMENT_CLOSE: &str = "</body></html>";
const LEADING_WRAPPERS: [&str; 2] = ["<html>", "<body>"];
const TRAILING_WRAPPERS: [&str; 2] = ["</html>", "</body>"];

/// Serializes structure tokens and cell contents into table markup.
#[derive(Debug, Clone)]
pub struct TableSerializer {
    style: String,
    escape_cell_text: bool,
}

impl Default for TableSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSerializer {
    /// Create a serializer with the default style block and no escaping.
    pub fn new() -> Self {
        Self {
            style: DEFAULT_TABLE_STYLE.to_string(),
            escape_cell_text: false,
        }
    }

    /// Create a serializer from a layout configuration.
    pub fn with_config(config: &LayoutConfig) -> Self {
        Self {
            style: config.table_style.clone(),
            escape_cell_text: config.escape_cell_text,
        }
    }

    /// Render the table.
    ///
    /// `contents[i]` fills the i-th `<td></td>` placeholder. A `<table>` element
    /// and the `<html><body>` document wrapper are added when the tokens do not
    /// already carry them.
    ///
    /// # Errors
    ///
    /// - [`Error::InputInvalid`] when `tokens` is empty.
    /// - [`Error::StructureMismatch`] when the number of placeholders differs
    ///   from `contents.len()`. The table is never truncated or padded.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::table::{StructureToken, TableSerializer};
    ///
    /// let tokens =
    ///     StructureToken::parse_all(&["<tr>", "<td></td>", "<td></td>", "</tr>"]).unwrap();
    /// let contents = vec!["Hi".to_string(), "There".to_string()];
    ///
    /// let html = TableSerializer::new().serialize(&tokens, &contents).unwrap();
    /// assert!(html.contains("<table><tr><td>Hi</td><td>There</td></tr></table>"));
    /// ```
    pub fn serialize(&self, tokens: &[StructureToken], contents: &[String]) -> Result<String> {
        if tokens.is_empty() {
            return Err(Error::InputInvalid(
                "table serialization needs at least one structure token".to_string(),
            ));
        }

        let placeholders = count_placeholders(tokens);
        if placeholders != contents.len() {
            return Err(Error::StructureMismatch {
                placeholders,
                contents: contents.len(),
            });
        }

        let has_document = tokens
            .iter()
            .any(|t| matches!(t, StructureToken::Other(raw) if raw == "<html>"));
        let has_table = tokens
            .iter()
            .any(|t| matches!(t, StructureToken::TableOpen(_)));

        let mut html = String::with_capacity(self.style.len() + tokens.len() * 8);
        html.push_str(&self.style);
        if !has_document {
            html.push_str(DOCUMENT_OPEN);
        }
        if !has_table {
            html.push_str("<table>");
        }

        let mut cells = contents.iter();
        for token in tokens {
            if token.is_placeholder() {
                // Counts were checked above
                let content = cells.next().map(String::as_str).unwrap_or_default();
                html.push_str("<td>");
                if self.escape_cell_text {
                    html.push_str(&escape_html(content));
                } else {
                    html.push_str(content);
                }
                html.push_str("</td>");
            } else {
                html.push_str(token.as_markup());
            }
        }

        if !has_table {
            html.push_str("</table>");
        }
        if !has_document {
            html.push_str(DOCUMENT_CLOSE);
        }

        log::debug!(
            "Serialized table: {} tokens, {} cells, {} bytes",
            tokens.len(),
            placeholders,
            html.len()
        );

        Ok(html)
    }
}

/// Remove the style block and document wrapper from serialized table markup.
///
/// Returns the input unchanged when it contains no `<style>…</style>` block.
/// Wrapper tags are only removed from the start and end of the markup, so
/// cell text that happens to contain `<body>` survives.
///
/// # Examples
///
/// ```
/// use ocr_layout::table::strip_style;
///
/// let html = "<style>td{padding:5px;}</style><html><body><table></table></body></html>";
/// assert_eq!(strip_style(html), "<table></table>");
/// assert_eq!(strip_style("<table></table>"), "<table></table>");
/// ```
pub fn strip_style(html: &str) -> String {
    let Some(start) = html.find("<style>") else {
        return html.to_string();
    };
    let Some(close) = html[start..].find("</style>") else {
        return html.to_string();
    };
    let end = start + close + "</style>".len();

    let mut cleaned = String::with_capacity(html.len());
    cleaned.push_str(&html[..start]);
    cleaned.push_str(&html[end..]);

    let mut body = cleaned.trim();
    for tag in LEADING_WRAPPERS {
        if let Some(rest) = body.strip_prefix(tag) {
            body = rest.trim_start();
        }
    }
    for tag in TRAILING_WRAPPERS {
        if let Some(rest) = body.strip_suffix(tag) {
            body = rest.trim_end();
        }
    }
    body.to_string()
}

/// Escape HTML special characters.
///
/// Replaces &, <, >, ", and ' with their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// # use ocr_layout::table::escape_html;
/// let text = "AT&T <Company>";
/// let escaped = escape_html(text);
/// assert_eq!(escaped, "AT&amp;T &lt;Company&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

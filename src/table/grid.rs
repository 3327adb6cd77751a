//! Cell grid extraction from cleaned table markup.
//!
//! Spreadsheet exporters need a rectangular grid, not markup. [`TableGrid`]
//! reads the `<table>` produced by [`strip_style`](super::strip_style) back
//! into rows of cells with their spans, and can expand spans into a dense
//! row-major grid.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest colspan or rowspan honored; bigger values are clamped.
pub const MAX_SPAN: usize = 1000;

lazy_static! {
    /// One table row and its inner markup
    static ref RE_ROW: Regex = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap();

    /// One cell: tag name, attributes, inner markup
    static ref RE_CELL: Regex = Regex::new(r"(?s)<(td|th)([^>]*)>(.*?)</(?:td|th)>").unwrap();

    /// colspan / rowspan attribute, quoted or not
    static ref RE_SPAN: Regex =
        Regex::new(r#"(colspan|rowspan)\s*=\s*["']?(\d+)["']?"#).unwrap();

    /// Any tag left inside cell content (e.g. <b>)
    static ref RE_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// One cell of a parsed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Plain-text content
    pub text: String,
    /// Columns covered (at least 1)
    pub colspan: usize,
    /// Rows covered (at least 1)
    pub rowspan: usize,
    /// Whether the cell was a `<th>`
    pub header: bool,
}

/// Rows of cells parsed from table markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Cells per row, as written in the markup
    pub rows: Vec<Vec<GridCell>>,
}

impl TableGrid {
    /// Parse cleaned `<table>…</table>` markup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputInvalid`] when the markup has no `<table` element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::table::TableGrid;
    ///
    /// let grid = TableGrid::from_html(
    ///     "<table><tr><td colspan=\"2\">Name</td></tr><tr><td>A</td><td>B</td></tr></table>",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(grid.num_rows(), 2);
    /// assert_eq!(grid.num_cols(), 2);
    /// assert_eq!(grid.to_rows()[0], vec!["Name".to_string(), String::new()]);
    /// ```
    pub fn from_html(html: &str) -> Result<Self> {
        if !html.contains("<table") {
            return Err(Error::InputInvalid(
                "markup does not contain a <table> element".to_string(),
            ));
        }

        let rows: Vec<Vec<GridCell>> = RE_ROW
            .captures_iter(html)
            .map(|row| RE_CELL.captures_iter(&row[1]).map(|c| parse_cell(&c)).collect())
            .collect();

        log::debug!("Parsed table grid with {} rows", rows.len());

        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns once spans are expanded.
    pub fn num_cols(&self) -> usize {
        self.layout().first().map_or(0, Vec::len)
    }

    /// Expand spans into a dense `rows × cols` grid of strings.
    ///
    /// A spanning cell's text goes to its top-left slot; the other covered
    /// slots are empty. Row spans running past the last row are clipped.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.layout()
            .into_iter()
            .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
            .collect()
    }

    fn layout(&self) -> Vec<Vec<Option<String>>> {
        let num_rows = self.rows.len();
        let mut dense: Vec<Vec<Option<String>>> = vec![Vec::new(); num_rows];
        let mut occupied: Vec<Vec<bool>> = vec![Vec::new(); num_rows];

        for (r, row) in self.rows.iter().enumerate() {
            let mut c = 0;
            for cell in row {
                while occupied[r].get(c).copied().unwrap_or(false) {
                    c += 1;
                }

                let last_row = r.saturating_add(cell.rowspan).min(num_rows);
                let last_col = c.saturating_add(cell.colspan);
                for rr in r..last_row {
                    for cc in c..last_col {
                        if occupied[rr].len() <= cc {
                            occupied[rr].resize(cc + 1, false);
                            dense[rr].resize(cc + 1, None);
                        }
                        occupied[rr][cc] = true;
                        dense[rr][cc] = Some(if rr == r && cc == c {
                            cell.text.clone()
                        } else {
                            String::new()
                        });
                    }
                }
                c = last_col;
            }
        }

        let width = dense.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut dense {
            row.resize(width, None);
        }
        dense
    }
}

fn parse_cell(caps: &regex::Captures<'_>) -> GridCell {
    let mut colspan = 1;
    let mut rowspan = 1;
    for span in RE_SPAN.captures_iter(&caps[2]) {
        // Digits too long for usize saturate rather than fall back to 1
        let raw = span[2].parse::<usize>().unwrap_or(usize::MAX);
        if raw > MAX_SPAN {
            log::warn!("Clamping {} '{}' to {}", &span[1], &span[2], MAX_SPAN);
        }
        let value = raw.clamp(1, MAX_SPAN);
        match &span[1] {
            "colspan" => colspan = value,
            _ => rowspan = value,
        }
    }

    GridCell {
        text: unescape_html(RE_TAG.replace_all(&caps[3], "").trim()),
        colspan,
        rowspan,
        header: &caps[1] == "th",
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

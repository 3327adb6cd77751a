//! Table structure tokens.
//!
//! A table-structure model describes a table as an ordered sequence of markup
//! tokens. Only the empty-cell placeholder `<td></td>` is rewritten during
//! serialization; everything else (row and table boundaries, the pieces of a
//! spanning cell such as `<td`, ` colspan="2"`, `>`, `</td>`) passes through
//! untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Markup of the empty-cell placeholder token.
pub const EMPTY_CELL: &str = "<td></td>";

/// One item of a table-structure token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StructureToken {
    /// `<table>` or `<table ...>` (raw markup kept for attributes)
    TableOpen(String),
    /// `</table>`
    TableClose,
    /// `<thead>`
    HeadOpen,
    /// `</thead>`
    HeadClose,
    /// `<tbody>`
    BodyOpen,
    /// `</tbody>`
    BodyClose,
    /// `<tr>`
    RowOpen,
    /// `</tr>`
    RowClose,
    /// `<td></td>`, filled with recognized content
    EmptyCell,
    /// Any other markup, emitted verbatim
    Other(String),
}

impl StructureToken {
    /// Classify a token string emitted by a structure model.
    ///
    /// Whitespace is significant: attribute fragments such as ` rowspan="2"`
    /// carry a leading space that must survive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] for an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::table::StructureToken;
    ///
    /// assert_eq!(StructureToken::parse("<tr>").unwrap(), StructureToken::RowOpen);
    /// assert_eq!(StructureToken::parse("<td></td>").unwrap(), StructureToken::EmptyCell);
    /// assert!(StructureToken::parse("").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let parsed = match token {
            "" => return Err(Error::InvalidToken(token.to_string())),
            "</table>" => Self::TableClose,
            "<thead>" => Self::HeadOpen,
            "</thead>" => Self::HeadClose,
            "<tbody>" => Self::BodyOpen,
            "</tbody>" => Self::BodyClose,
            "<tr>" => Self::RowOpen,
            "</tr>" => Self::RowClose,
            EMPTY_CELL => Self::EmptyCell,
            t if is_table_open(t) => Self::TableOpen(t.to_string()),
            t => Self::Other(t.to_string()),
        };
        Ok(parsed)
    }

    /// Parse a whole token sequence.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    /// The markup this token stands for.
    pub fn as_markup(&self) -> &str {
        match self {
            Self::TableOpen(raw) | Self::Other(raw) => raw,
            Self::TableClose => "</table>",
            Self::HeadOpen => "<thead>",
            Self::HeadClose => "</thead>",
            Self::BodyOpen => "<tbody>",
            Self::BodyClose => "</tbody>",
            Self::RowOpen => "<tr>",
            Self::RowClose => "</tr>",
            Self::EmptyCell => EMPTY_CELL,
        }
    }

    /// Whether this is the empty-cell placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::EmptyCell)
    }
}

fn is_table_open(token: &str) -> bool {
    token == "<table>" || (token.starts_with("<table ") && token.ends_with('>'))
}

/// Count placeholder tokens in a sequence.
pub fn count_placeholders(tokens: &[StructureToken]) -> usize {
    tokens.iter().filter(|t| t.is_placeholder()).count()
}

impl fmt::Display for StructureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_markup())
    }
}

impl FromStr for StructureToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StructureToken {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<StructureToken> for String {
    fn from(token: StructureToken) -> Self {
        token.as_markup().to_string()
    }
}

//! Table cell-content fusion.
//!
//! Recognized text fragments are assigned to cells predicted by a separate
//! table-structure model, then written back into the model's structure tokens:
//!
//! ```text
//! [TableCell] + [TextFragment]
//!     ↓ match_cells (overlap, then corner distance)
//! MatchTable (cell → fragment indices)
//!     ↓ cell_contents
//! [String] (one per cell)
//!     ↓ TableSerializer (placeholders filled in order)
//! HTML table
//!     ↓ strip_style / TableGrid
//! bare <table> / dense grid for spreadsheet export
//! ```

pub mod grid;
pub mod matcher;
pub mod serializer;
pub mod tokens;

// Re-export main types
pub use grid::{GridCell, TableGrid, MAX_SPAN};
pub use matcher::{match_cells, CellMatcher, MatchTable, TableCell};
pub use serializer::{escape_html, strip_style, TableSerializer};
pub use tokens::{count_placeholders, StructureToken, EMPTY_CELL};

//! Contracts for the external models the pipeline drives.
//!
//! Inference, image decoding and model lifecycle live outside this crate.
//! Callers plug their engines in by implementing these traits for whatever
//! image type they use.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::TextFragment;
use crate::table::{count_placeholders, StructureToken, TableCell};

/// Output of a table-structure model.
///
/// The model must emit one cell per `<td></td>` placeholder, in placeholder
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStructure {
    /// Structure token sequence
    pub tokens: Vec<StructureToken>,
    /// Predicted cells, one per placeholder
    pub cells: Vec<TableCell>,
}

impl TableStructure {
    /// Create a structure from tokens and cells.
    pub fn new(tokens: Vec<StructureToken>, cells: Vec<TableCell>) -> Self {
        Self { tokens, cells }
    }

    /// Number of empty-cell placeholders in the tokens.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.tokens)
    }

    /// Whether the cell count matches the placeholder count.
    pub fn is_consistent(&self) -> bool {
        self.placeholder_count() == self.cells.len()
    }
}

/// Predicts table structure for an image.
pub trait TableStructureModel<I: ?Sized>: Send + Sync {
    /// Run the model on `image`.
    fn predict(&self, image: &I) -> Result<TableStructure>;

    /// Return the name of this model for debugging.
    fn name(&self) -> &'static str {
        "TableStructureModel"
    }
}

/// Detects and recognizes text regions in an image.
///
/// Fragments may come back in any order, but the order must be stable for
/// identical input.
pub trait TextRecognizer<I: ?Sized>: Send + Sync {
    /// Run detection and recognition on `image`.
    fn recognize(&self, image: &I) -> Result<Vec<TextFragment>>;

    /// Return the name of this recognizer for debugging.
    fn name(&self) -> &'static str {
        "TextRecognizer"
    }
}

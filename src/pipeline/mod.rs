//! Layout reconstruction pipeline.
//!
//! Sequences the external models and the pure layout components:
//!
//! ```text
//! image
//!   ├─ [TableStructureModel] → tokens + cells ─┐
//!   └─ [TextRecognizer] → fragments ───────────┤
//!                                              ↓
//!                      match_cells → cell contents → TableSerializer → TableResult
//!
//! image → [TextRecognizer] → fragments → LineClusterer → reading-order text
//! ```
//!
//! The pipeline holds no per-request state; one instance can serve many
//! documents concurrently.

pub mod collaborators;

pub use collaborators::{TableStructure, TableStructureModel, TextRecognizer};

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::{Line, LineClusterer, TextFragment};
use crate::table::{
    strip_style, CellMatcher, MatchTable, StructureToken, TableCell, TableGrid, TableSerializer,
};

/// A recognized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    /// Structure tokens from the structure model
    pub tokens: Vec<StructureToken>,
    /// Cells from the structure model
    pub cells: Vec<TableCell>,
    /// Fragment assignment per cell
    pub matches: MatchTable,
    /// Joined content per cell
    pub cell_contents: Vec<String>,
    /// Serialized table markup, style block included
    pub html: String,
}

impl TableResult {
    /// Markup with the style block and document wrapper removed.
    pub fn cleaned_html(&self) -> String {
        strip_style(&self.html)
    }

    /// Parse the table into a grid for spreadsheet export.
    pub fn to_grid(&self) -> Result<TableGrid> {
        TableGrid::from_html(&self.cleaned_html())
    }
}

/// Orchestrates table fusion and reading-order reconstruction.
#[derive(Debug, Clone)]
pub struct LayoutPipeline {
    config: LayoutConfig,
    clusterer: LineClusterer,
    matcher: CellMatcher,
    serializer: TableSerializer,
}

impl LayoutPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::build(LayoutConfig::default())
    }

    /// Create a pipeline with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration does not validate.
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: LayoutConfig) -> Self {
        Self {
            clusterer: LineClusterer::with_config(&config),
            matcher: CellMatcher::new(config.word_separator.clone()),
            serializer: TableSerializer::with_config(&config),
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Fuse recognized fragments into a predicted table structure.
    ///
    /// Fragments must be in detection order; that order is kept inside each
    /// cell.
    ///
    /// # Errors
    ///
    /// - [`Error::InputInvalid`] when the structure has no tokens.
    /// - [`Error::StructureMismatch`] when the structure's cell count does not
    ///   match its placeholder count.
    pub fn fuse_table(
        &self,
        structure: TableStructure,
        fragments: &[TextFragment],
    ) -> Result<TableResult> {
        if structure.tokens.is_empty() {
            return Err(Error::InputInvalid(
                "table structure has no tokens".to_string(),
            ));
        }
        if !structure.is_consistent() {
            return Err(Error::StructureMismatch {
                placeholders: structure.placeholder_count(),
                contents: structure.cells.len(),
            });
        }

        let (matches, cell_contents) = self.matcher.fuse(&structure.cells, fragments)?;
        let html = self.serializer.serialize(&structure.tokens, &cell_contents)?;

        Ok(TableResult {
            tokens: structure.tokens,
            cells: structure.cells,
            matches,
            cell_contents,
            html,
        })
    }

    /// Group fragments into reading-order lines.
    pub fn reading_order(&self, fragments: &[TextFragment]) -> Result<Vec<Line>> {
        self.clusterer.cluster(fragments)
    }

    /// Run both models on `image` and fuse their output into a table.
    pub fn recognize_table<I, S, R>(
        &self,
        structure_model: &S,
        recognizer: &R,
        image: &I,
    ) -> Result<TableResult>
    where
        I: ?Sized,
        S: TableStructureModel<I> + ?Sized,
        R: TextRecognizer<I> + ?Sized,
    {
        let structure = structure_model.predict(image)?;
        log::debug!(
            "{}: {} tokens, {} cells",
            structure_model.name(),
            structure.tokens.len(),
            structure.cells.len()
        );

        let fragments = recognizer.recognize(image)?;
        log::debug!("{}: {} fragments", recognizer.name(), fragments.len());

        self.fuse_table(structure, &fragments)
    }

    /// Recognize free-form text on `image` and return it in reading order.
    pub fn recognize_text<I, R>(&self, recognizer: &R, image: &I) -> Result<String>
    where
        I: ?Sized,
        R: TextRecognizer<I> + ?Sized,
    {
        let fragments = recognizer.recognize(image)?;
        log::debug!("{}: {} fragments", recognizer.name(), fragments.len());
        self.clusterer.reading_order_text(&fragments)
    }
}

impl Default for LayoutPipeline {
    fn default() -> Self {
        Self::new()
    }
}

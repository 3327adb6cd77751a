//! Cell fusion: assigning recognized text to predicted table cells.
//!
//! Every fragment goes to exactly one cell. The winning cell is the one with
//! the greatest overlap; among cells with equal overlap, the one with the
//! smallest corner [`distance`] wins. The two keys are compared in that order
//! rather than folded into one score, so floating-point summation cannot
//! reorder candidates.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{distance, iou, AxisBox, Quad};
use crate::layout::TextFragment;
use crate::utils::safe_float_cmp;

/// One structural cell predicted by a table-structure model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell region
    pub quad: Quad,
}

impl TableCell {
    /// Create a cell from its region.
    pub fn new(quad: Quad) -> Self {
        Self { quad }
    }

    /// Create an axis-aligned cell.
    pub fn from_rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Quad::from_rect(x0, y0, x1, y1))
    }

    /// Axis-aligned box enclosing the cell.
    pub fn bbox(&self) -> AxisBox {
        self.quad.axis_box()
    }
}

/// Cell index → fragment indices, in the order fragments were assigned.
///
/// Cells that received no fragment have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTable {
    cells: BTreeMap<usize, Vec<usize>>,
}

impl MatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to a cell.
    pub fn insert(&mut self, cell: usize, fragment: usize) {
        self.cells.entry(cell).or_default().push(fragment);
    }

    /// Fragments assigned to `cell`, if any.
    pub fn get(&self, cell: usize) -> Option<&[usize]> {
        self.cells.get(&cell).map(Vec::as_slice)
    }

    /// The cell a fragment was assigned to.
    pub fn cell_for(&self, fragment: usize) -> Option<usize> {
        self.cells
            .iter()
            .find(|(_, fragments)| fragments.contains(&fragment))
            .map(|(&cell, _)| cell)
    }

    /// Iterate over `(cell, fragments)` in ascending cell order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.cells.iter().map(|(&cell, f)| (cell, f.as_slice()))
    }

    /// Number of cells with at least one fragment.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no fragment was assigned.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of assigned fragments.
    pub fn fragment_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Join each cell's fragment texts in assignment order.
    ///
    /// Returns one string per cell in `0..cell_count`; cells without fragments
    /// yield an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputInvalid`] if the table refers to a cell at or past
    /// `cell_count` or to a fragment outside `fragments`.
    pub fn cell_contents(
        &self,
        cell_count: usize,
        fragments: &[TextFragment],
        separator: &str,
    ) -> Result<Vec<String>> {
        if let Some((&cell, _)) = self.cells.range(cell_count..).next() {
            return Err(Error::InputInvalid(format!(
                "match table refers to cell {} but only {} cells exist",
                cell, cell_count
            )));
        }

        (0..cell_count)
            .map(|cell| {
                let Some(indices) = self.cells.get(&cell) else {
                    return Ok(String::new());
                };
                let texts = indices
                    .iter()
                    .map(|&i| {
                        fragments.get(i).map(|f| f.text.as_str()).ok_or_else(|| {
                            Error::InputInvalid(format!(
                                "match table refers to fragment {} but only {} fragments exist",
                                i,
                                fragments.len()
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(texts.join(separator))
            })
            .collect()
    }
}

/// Ranking of one cell for one fragment.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cell: usize,
    iou_compl: f32,
    distance: f32,
}

/// Overlap first (ascending `1 - iou`), then corner distance.
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    safe_float_cmp(a.iou_compl, b.iou_compl).then_with(|| safe_float_cmp(a.distance, b.distance))
}

/// Find the best cell for one fragment box. Exact ties keep the lower cell index.
fn best_cell(fragment: &AxisBox, cells: &[AxisBox]) -> Option<Candidate> {
    cells
        .iter()
        .enumerate()
        .map(|(cell, cell_box)| Candidate {
            cell,
            iou_compl: 1.0 - iou(fragment, cell_box),
            distance: distance(fragment, cell_box),
        })
        .min_by(compare_candidates)
}

/// Assign each fragment, in detection order, to its best-matching cell.
///
/// An empty `cells` list yields an empty table (every fragment unmatched);
/// an empty `fragments` list leaves every cell empty.
///
/// # Examples
///
/// ```
/// use ocr_layout::layout::TextFragment;
/// use ocr_layout::table::{match_cells, TableCell};
///
/// let cells = vec![
///     TableCell::from_rect(0.0, 0.0, 50.0, 20.0),
///     TableCell::from_rect(50.0, 0.0, 100.0, 20.0),
/// ];
/// let fragments = vec![
///     TextFragment::from_rect(2.0, 2.0, 40.0, 18.0, "Hi"),
///     TextFragment::from_rect(55.0, 2.0, 95.0, 18.0, "There"),
/// ];
///
/// let matches = match_cells(&cells, &fragments);
/// assert_eq!(matches.get(0), Some(&[0][..]));
/// assert_eq!(matches.get(1), Some(&[1][..]));
/// ```
pub fn match_cells(cells: &[TableCell], fragments: &[TextFragment]) -> MatchTable {
    let mut table = MatchTable::new();

    if cells.is_empty() {
        log::debug!(
            "No table cells: leaving {} fragment(s) unmatched",
            fragments.len()
        );
        return table;
    }

    let cell_boxes: Vec<AxisBox> = cells.iter().map(TableCell::bbox).collect();

    for (idx, fragment) in fragments.iter().enumerate() {
        let fragment_box = fragment.bbox();
        let Some(best) = best_cell(&fragment_box, &cell_boxes) else {
            continue;
        };

        if best.iou_compl >= 1.0 {
            log::warn!(
                "Fragment {} ('{}') overlaps no cell; assigned to nearest cell {} (distance={:.1})",
                idx,
                fragment.text,
                best.cell,
                best.distance
            );
        } else {
            log::trace!(
                "Fragment {} -> cell {} (iou={:.3}, distance={:.1})",
                idx,
                best.cell,
                1.0 - best.iou_compl,
                best.distance
            );
        }

        table.insert(best.cell, idx);
    }

    log::debug!(
        "Matched {} fragment(s) into {} of {} cell(s)",
        table.fragment_count(),
        table.len(),
        cells.len()
    );

    table
}

/// Cell matcher with a fixed content separator.
#[derive(Debug, Clone)]
pub struct CellMatcher {
    separator: String,
}

impl Default for CellMatcher {
    fn default() -> Self {
        Self::new(" ")
    }
}

impl CellMatcher {
    /// Create a matcher joining cell fragments with `separator`.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Match fragments and assemble one content string per cell.
    pub fn fuse(
        &self,
        cells: &[TableCell],
        fragments: &[TextFragment],
    ) -> Result<(MatchTable, Vec<String>)> {
        let matches = match_cells(cells, fragments);
        let contents = matches.cell_contents(cells.len(), fragments, &self.separator)?;
        Ok((matches, contents))
    }
}

//! Reading-order line segmentation.
//!
//! Groups free-floating text fragments into lines using a fixed vertical
//! threshold, then orders each line left-to-right. Lines come out
//! top-to-bottom.
//!
//! The algorithm is anchor based: fragments are visited in ascending `y0`
//! order and each line is anchored on its first (topmost) fragment. A fragment
//! joins the current line while `|y0 - anchor.y0| < threshold`; otherwise it
//! starts a new line and becomes the new anchor.

use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, DEFAULT_LINE_THRESHOLD};
use crate::error::{Error, Result};
use crate::geometry::AxisBox;
use crate::layout::fragment::TextFragment;
use crate::utils::safe_float_cmp;

/// A run of fragments sharing an inferred text row, sorted left-to-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Fragments in left-to-right order
    pub fragments: Vec<TextFragment>,
    /// Position of each fragment in the clusterer's input
    pub source_indices: Vec<usize>,
}

impl Line {
    /// Number of fragments in the line.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the line has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Join the fragment texts with `separator`.
    pub fn text(&self, separator: &str) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Union of all fragment boxes, or `None` for an empty line.
    pub fn bbox(&self) -> Option<AxisBox> {
        let mut iter = self.fragments.iter().map(TextFragment::bbox);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }
}

/// Clusters text fragments into reading-order lines.
#[derive(Debug, Clone)]
pub struct LineClusterer {
    threshold: f32,
    word_separator: String,
    line_separator: String,
}

impl Default for LineClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_THRESHOLD)
    }
}

impl LineClusterer {
    /// Create a clusterer with the given vertical threshold and default
    /// separators.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            word_separator: " ".to_string(),
            line_separator: "\n".to_string(),
        }
    }

    /// Create a clusterer from a layout configuration.
    pub fn with_config(config: &LayoutConfig) -> Self {
        Self {
            threshold: config.line_threshold,
            word_separator: config.word_separator.clone(),
            line_separator: config.line_separator.clone(),
        }
    }

    /// The vertical threshold in use.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Group fragments into lines.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] when the threshold is negative or not finite.
    /// - [`Error::InputInvalid`] when `fragments` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::layout::{LineClusterer, TextFragment};
    ///
    /// let fragments = vec![
    ///     TextFragment::from_rect(60.0, 12.0, 90.0, 30.0, "B"),
    ///     TextFragment::from_rect(0.0, 50.0, 30.0, 70.0, "C"),
    ///     TextFragment::from_rect(0.0, 10.0, 30.0, 28.0, "A"),
    /// ];
    ///
    /// let lines = LineClusterer::new(20.0).cluster(&fragments).unwrap();
    /// assert_eq!(lines.len(), 2);
    /// assert_eq!(lines[0].text(" "), "A B");
    /// assert_eq!(lines[1].text(" "), "C");
    /// ```
    pub fn cluster(&self, fragments: &[TextFragment]) -> Result<Vec<Line>> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "line threshold must be a finite non-negative number, got {}",
                self.threshold
            )));
        }
        if fragments.is_empty() {
            return Err(Error::InputInvalid(
                "line clustering needs at least one fragment".to_string(),
            ));
        }

        let boxes: Vec<AxisBox> = fragments.iter().map(TextFragment::bbox).collect();

        // Stable sort: fragments with equal y0 keep their input order
        let mut order: Vec<usize> = (0..fragments.len()).collect();
        order.sort_by(|&a, &b| safe_float_cmp(boxes[a].y0, boxes[b].y0));

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut current = vec![order[0]];
        let mut anchor_y = boxes[order[0]].y0;

        for &idx in &order[1..] {
            let y = boxes[idx].y0;
            if (y - anchor_y).abs() < self.threshold {
                current.push(idx);
            } else {
                groups.push(std::mem::take(&mut current));
                current.push(idx);
                anchor_y = y;
            }
        }
        groups.push(current);

        let lines: Vec<Line> = groups
            .into_iter()
            .map(|mut group| {
                group.sort_by(|&a, &b| safe_float_cmp(boxes[a].x0, boxes[b].x0));
                Line {
                    fragments: group.iter().map(|&i| fragments[i].clone()).collect(),
                    source_indices: group,
                }
            })
            .collect();

        log::debug!(
            "Clustered {} fragments into {} lines (threshold={:.1})",
            fragments.len(),
            lines.len(),
            self.threshold
        );

        Ok(lines)
    }

    /// Cluster fragments and join them into page-level text.
    ///
    /// Fragments within a line are joined by the word separator, lines by the
    /// line separator.
    pub fn reading_order_text(&self, fragments: &[TextFragment]) -> Result<String> {
        let lines = self.cluster(fragments)?;
        Ok(join_lines(&lines, &self.word_separator, &self.line_separator))
    }
}

/// Group fragments into lines with the given vertical threshold.
///
/// Shorthand for [`LineClusterer::new`] followed by [`LineClusterer::cluster`].
pub fn cluster_lines(fragments: &[TextFragment], threshold: f32) -> Result<Vec<Line>> {
    LineClusterer::new(threshold).cluster(fragments)
}

/// Join lines into a single string.
pub fn join_lines(lines: &[Line], word_separator: &str, line_separator: &str) -> String {
    lines
        .iter()
        .map(|line| line.text(word_separator))
        .collect::<Vec<_>>()
        .join(line_separator)
}

//! Recognized text fragments.

use serde::{Deserialize, Serialize};

use crate::geometry::{AxisBox, Quad};

/// One recognized text region: where it is and what it says.
///
/// Fragments are produced by an external detection + recognition pipeline and
/// are read-only input to layout reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Detected region
    pub quad: Quad,
    /// Recognized text
    pub text: String,
}

impl TextFragment {
    /// Create a fragment from a detected region and its text.
    pub fn new(quad: Quad, text: impl Into<String>) -> Self {
        Self {
            quad,
            text: text.into(),
        }
    }

    /// Create a fragment with an axis-aligned region.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::layout::TextFragment;
    ///
    /// let fragment = TextFragment::from_rect(0.0, 0.0, 40.0, 12.0, "Total");
    /// assert_eq!(fragment.bbox().x1, 40.0);
    /// assert_eq!(fragment.text, "Total");
    /// ```
    pub fn from_rect(x0: f32, y0: f32, x1: f32, y1: f32, text: impl Into<String>) -> Self {
        Self::new(Quad::from_rect(x0, y0, x1, y1), text)
    }

    /// Axis-aligned box enclosing the fragment's region.
    pub fn bbox(&self) -> AxisBox {
        self.quad.axis_box()
    }
}

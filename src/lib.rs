// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # OCR Layout
//!
//! Layout reconstruction for OCR output. Text detectors emit fragments out of
//! order and with imprecise geometry; this crate turns them back into the
//! structure a reader expects.
//!
//! ## Core Features
//!
//! - **Reading Order**: anchor-based line clustering, top-to-bottom, left-to-right
//! - **Cell Fusion**: assigns recognized text to predicted table cells by overlap,
//!   then corner distance
//! - **Table Markup**: fills structure-model tokens with cell content, producing HTML
//! - **Spreadsheet Prep**: strips styling and expands spans into a dense grid
//!
//! Inference itself is out of scope. Detection, recognition and table-structure
//! models plug in through the [`pipeline::TextRecognizer`] and
//! [`pipeline::TableStructureModel`] traits.
//!
//! ## Quick Start
//!
//! ```
//! use ocr_layout::layout::TextFragment;
//! use ocr_layout::pipeline::{LayoutPipeline, TableStructure};
//! use ocr_layout::table::{StructureToken, TableCell};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let structure = TableStructure::new(
//!     StructureToken::parse_all(&["<tr>", "<td></td>", "<td></td>", "</tr>"])?,
//!     vec![
//!         TableCell::from_rect(0.0, 0.0, 50.0, 20.0),
//!         TableCell::from_rect(50.0, 0.0, 100.0, 20.0),
//!     ],
//! );
//! let fragments = vec![
//!     TextFragment::from_rect(2.0, 2.0, 45.0, 18.0, "Hi"),
//!     TextFragment::from_rect(55.0, 2.0, 95.0, 18.0, "There"),
//! ];
//!
//! let pipeline = LayoutPipeline::new();
//! let table = pipeline.fuse_table(structure, &fragments)?;
//! assert!(table.html.contains("<td>Hi</td><td>There</td>"));
//!
//! let lines = pipeline.reading_order(&fragments)?;
//! assert_eq!(lines[0].text(" "), "Hi There");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry
pub mod geometry;

// Reading order
pub mod layout;

// Table fusion
pub mod table;

// Orchestration
pub mod pipeline;

// Re-exports
pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use layout::{Line, LineClusterer, TextFragment};
pub use pipeline::{LayoutPipeline, TableResult};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats, placing NaN after every number.
    ///
    /// NaN values are treated as equal to each other, so sorts and `min_by`
    /// never panic on malformed coordinates.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

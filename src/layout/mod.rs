//! Reading-order reconstruction for free-form text.
//!
//! - [`TextFragment`]: one recognized region (quad + text)
//! - [`LineClusterer`]: fragments → lines, top-to-bottom, left-to-right

pub mod fragment;
pub mod line_clusterer;

// Re-export main types
pub use fragment::TextFragment;
pub use line_clusterer::{cluster_lines, join_lines, Line, LineClusterer};

//! Unicode helpers for grapheme segmentation and display width.

mod grapheme;
mod width;

pub use grapheme::{
    floor_grapheme_boundary, grapheme_count, grapheme_indices, grapheme_range_at, graphemes,
    is_grapheme_boundary, next_grapheme_boundary, prev_grapheme_boundary,
};
pub use width::{WidthMethod, display_width, display_width_char, display_width_with_method};

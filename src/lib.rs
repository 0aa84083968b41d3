//! `polytext` - Copy-on-write text values with encoding views
//!
//! A text value type and a zero-copy substring view of it, where one piece
//! of storage can be observed through four mutually consistent encoding
//! projections: 8-bit code units, 16-bit code units, Unicode scalar
//! values, and user-perceived grapheme clusters.
//!
//! Slicing is O(1) and never copies; mutation is copy-on-write, so no
//! owner ever observes another owner's edits; and a substring keeps the
//! whole backing buffer of the value it was sliced from alive until it is
//! materialized into an owning value.
//!
//! ```
//! use polytext::TextValue;
//!
//! let text = TextValue::from("Hi there! 👋");
//! let wave = text.slice(text.index_offset_by(text.start_index(), 10)..text.end_index());
//! assert_eq!(wave.grapheme_count(), 1);
//! assert_eq!(wave.utf16().len(), 2); // one surrogate pair
//! assert_eq!(wave.utf8().len(), 4);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow Utf8Unit in view::utf8 etc
#![allow(clippy::missing_panics_doc)] // Contract violations panic; documented per method
#![allow(clippy::missing_errors_doc)] // Error conditions documented inline
#![allow(clippy::cast_possible_wrap)] // Intentional length-to-distance casts
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::must_use_candidate)] // #[must_use] applied where it matters
#![allow(clippy::return_self_not_must_use)] // Builder-free API, not critical
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod error;
pub mod event;
pub mod index;
mod storage;
pub mod substring;
pub mod text;
pub mod unicode;
pub mod view;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, RepairEvent, set_log_callback, set_repair_callback};
pub use index::TextIndex;
pub use storage::SourceEncoding;
pub use substring::Substring;
pub use text::TextValue;

// Re-export the view family
pub use view::{
    EncodedView, GraphemeUnit, GraphemeView, Granularity, ScalarUnit, ScalarView, Utf8Unit,
    Utf8View, Utf16Unit, Utf16View,
};

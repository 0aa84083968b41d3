//! Encoding projections over shared text storage.
//!
//! One storage range can be observed through four mutually consistent
//! granularities: 8-bit code units, 16-bit code units, Unicode scalars,
//! and grapheme clusters. All four are the single generic
//! [`EncodedView`] instantiated with a different [`Granularity`], which
//! carries the shared navigation and bounds discipline.

mod grapheme;
mod projection;
mod scalar;
mod utf8;
mod utf16;

pub use grapheme::{GraphemeUnit, GraphemeView};
pub use projection::{EncodedView, Granularity, Iter, ViewCtx};
pub use scalar::{ScalarUnit, ScalarView};
pub use utf8::{Utf8Unit, Utf8View};
pub use utf16::{Utf16Unit, Utf16View};

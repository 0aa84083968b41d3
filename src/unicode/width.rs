//! Display width calculation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width convention for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Display width of a string in terminal columns, wcwidth convention.
#[must_use]
pub fn display_width(s: &str) -> usize {
    display_width_with_method(s, WidthMethod::default())
}

/// Display width of a string in terminal columns using a specific method.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Display width of a single scalar, wcwidth convention.
#[must_use]
pub fn display_width_char(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

//! The encoded storage engine.
//!
//! Owns the canonical UTF-8 buffer behind every [`TextValue`] and
//! [`Substring`]. The rest of the crate consumes it through a narrow
//! contract: borrow a range without copying, extract a range into fresh
//! owned storage, decode raw bytes with repair, and lend a scoped
//! null-terminated buffer. Sharing is reference-counted; mutation goes
//! through [`EncodedStorage::make_mut`], which copies first when the buffer
//! has other owners.
//!
//! [`TextValue`]: crate::TextValue
//! [`Substring`]: crate::Substring

use std::ffi::{CStr, CString};
use std::ops::Range;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::event::{LogLevel, RepairEvent, emit_log, emit_repair};

/// Declared encoding of raw input handed to [`EncodedStorage::decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8; malformed sequences become U+FFFD.
    Utf8,
    /// UTF-16, little-endian; unpaired surrogates and truncated pairs
    /// become U+FFFD.
    Utf16Le,
    /// UTF-16, big-endian.
    Utf16Be,
    /// 7-bit ASCII; bytes above 0x7F become U+FFFD.
    Ascii,
    /// ISO-8859-1; every byte maps to the scalar with the same value.
    Latin1,
}

/// Reference-counted canonical UTF-8 storage.
#[derive(Clone, Debug, Default)]
pub(crate) struct EncodedStorage {
    bytes: Arc<String>,
}

impl EncodedStorage {
    /// Empty storage.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Storage holding validated content.
    pub(crate) fn from_string(content: String) -> Self {
        Self {
            bytes: Arc::new(content),
        }
    }

    /// Decode raw bytes in a declared encoding, repairing malformed
    /// sequences with U+FFFD. Never fails.
    pub(crate) fn decode(bytes: &[u8], encoding: SourceEncoding) -> Self {
        let (decoded, repaired) = match encoding {
            SourceEncoding::Utf8 => match String::from_utf8_lossy(bytes) {
                std::borrow::Cow::Borrowed(valid) => (valid.to_owned(), false),
                std::borrow::Cow::Owned(repaired) => (repaired, true),
            },
            SourceEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            SourceEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            SourceEncoding::Ascii => {
                let mut repaired = false;
                let decoded = bytes
                    .iter()
                    .map(|&b| {
                        if b.is_ascii() {
                            char::from(b)
                        } else {
                            repaired = true;
                            char::REPLACEMENT_CHARACTER
                        }
                    })
                    .collect();
                (decoded, repaired)
            }
            SourceEncoding::Latin1 => (bytes.iter().map(|&b| char::from(b)).collect(), false),
        };
        if repaired {
            emit_repair(&RepairEvent {
                encoding,
                input_len: bytes.len(),
            });
        }
        Self::from_string(decoded)
    }

    /// The whole buffer.
    pub(crate) fn as_str(&self) -> &str {
        &self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow a byte range without copying. The bounds must lie on scalar
    /// boundaries.
    pub(crate) fn borrow_range(&self, range: Range<usize>) -> &str {
        &self.bytes[range]
    }

    /// Copy a byte range into fresh storage that shares nothing with this
    /// buffer.
    pub(crate) fn extract_owned(&self, range: Range<usize>) -> Self {
        Self::from_string(self.bytes[range].to_owned())
    }

    /// Whether this handle is the buffer's only owner.
    pub(crate) fn is_unique(&mut self) -> bool {
        Arc::get_mut(&mut self.bytes).is_some()
    }

    /// Mutable access to the buffer, copying first if it is shared.
    pub(crate) fn make_mut(&mut self) -> &mut String {
        if Arc::get_mut(&mut self.bytes).is_none() {
            emit_log(
                LogLevel::Debug,
                &format!("copy-on-write: duplicating {} bytes", self.bytes.len()),
            );
        }
        Arc::make_mut(&mut self.bytes)
    }

    /// Whether two handles share the same underlying buffer.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Lend a byte range as a temporary null-terminated buffer, valid only
    /// for the duration of the callback.
    pub(crate) fn with_c_str<R>(
        &self,
        range: Range<usize>,
        f: impl FnOnce(&CStr) -> R,
    ) -> Result<R> {
        let slice = self.borrow_range(range);
        let owned = CString::new(slice).map_err(|e| Error::InteriorNul {
            position: e.nul_position(),
        })?;
        Ok(f(&owned))
    }
}

/// Decode UTF-16 bytes with the given endianness reader.
fn decode_utf16(bytes: &[u8], read: impl Fn([u8; 2]) -> u16) -> (String, bool) {
    let truncated = bytes.len() % 2 != 0;
    let units = bytes
        .chunks_exact(2)
        .map(|pair| read([pair[0], pair[1]]));
    let mut repaired = truncated;
    let mut decoded = String::with_capacity(bytes.len());
    for unit in char::decode_utf16(units) {
        match unit {
            Ok(scalar) => decoded.push(scalar),
            Err(_) => {
                decoded.push(char::REPLACEMENT_CHARACTER);
                repaired = true;
            }
        }
    }
    if truncated {
        decoded.push(char::REPLACEMENT_CHARACTER);
    }
    (decoded, repaired)
}

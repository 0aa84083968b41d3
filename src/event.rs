//! Log and repair-notification callbacks.
//!
//! The library never writes to stderr or a logger on its own. Hosts that
//! want visibility into storage copies or decode repairs register a
//! callback here.

use std::sync::{Mutex, OnceLock};

use crate::storage::SourceEncoding;

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Notification that decoding replaced malformed input with U+FFFD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepairEvent {
    /// The declared encoding of the malformed input.
    pub encoding: SourceEncoding,
    /// Length of the raw input in bytes.
    pub input_len: usize,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;
type RepairCallback = Box<dyn Fn(&RepairEvent) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn repair_callback() -> &'static Mutex<Option<RepairCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<RepairCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a log line to the registered callback.
pub(crate) fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Set the global decode-repair callback.
pub fn set_repair_callback<F>(callback: F)
where
    F: Fn(&RepairEvent) + Send + Sync + 'static,
{
    let mut guard = repair_callback().lock().expect("repair callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a repair notification to the registered callback.
pub(crate) fn emit_repair(event: &RepairEvent) {
    if let Ok(guard) = repair_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_callback() {
        set_log_callback(|level, msg| {
            assert_eq!(level, LogLevel::Debug);
            assert!(!msg.is_empty());
        });
        emit_log(LogLevel::Debug, "copy-on-write: 5 bytes");
    }

    #[test]
    fn test_repair_callback() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        set_repair_callback(move |event| {
            assert_eq!(event.encoding, SourceEncoding::Utf8);
            seen_clone.store(event.input_len, Ordering::SeqCst);
        });
        emit_repair(&RepairEvent {
            encoding: SourceEncoding::Utf8,
            input_len: 3,
        });
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        // Restore a no-op callback so this test's Utf8-asserting closure does
        // not leak into other tests that emit repair events for other encodings.
        set_repair_callback(|_| {});
    }
}

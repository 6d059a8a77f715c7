//! Internal helpers for text normalization.
//!
//! These utilities are **not** part of the public API. Wallet names and
//! transaction descriptions go through them so that equal-looking strings
//! compare equal after a round trip through the store.

use unicode_normalization::UnicodeNormalization;

/// Trim surrounding whitespace and normalize to NFC.
pub(crate) fn normalize_text(value: &str) -> String {
    value.trim().nfc().collect()
}

/// Case-insensitive comparison of two already-normalized names.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == normalize_text(b).to_lowercase()
}

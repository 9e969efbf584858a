//! Name normalization for case/accent-insensitive comparisons.
//!
//! # Responsibility
//! - Map a display name to the canonical key stored as `normalized_name`.
//!
//! # Invariants
//! - `normalize(normalize(x)) == normalize(x)`.
//! - Only diacritics, surrounding whitespace and letter case are folded.
//!   Inner whitespace and punctuation are preserved as-is.
//! - Only non-spacing marks (`Mn`) are dropped. Spacing (`Mc`) and
//!   enclosing (`Me`) marks carry meaning and stay in the key.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Returns the canonical comparison key for `text`.
///
/// Steps: canonical decomposition, non-spacing marks dropped, canonical
/// recomposition, trim, upper-case. Whitespace-only input yields `""`.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let stripped = text
        .nfd()
        .filter(|ch| !is_nonspacing_mark(*ch))
        .nfc()
        .collect::<String>();
    stripped.trim().to_uppercase()
}

fn is_nonspacing_mark(ch: char) -> bool {
    ch.general_category() == GeneralCategory::NonspacingMark
}

//! Display-name rules shared by client and project entities.

use crate::normalize::normalize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted name length, counted in characters after trimming.
pub const NAME_MIN_CHARS: usize = 3;
/// Maximum accepted name length, mirrored by the `name` column check.
pub const NAME_MAX_CHARS: usize = 200;
/// Maximum accepted comparison-key length, mirrored by the
/// `normalized_name` column check. Upper-casing can grow a key (`ß` → `SS`).
pub const NORMALIZED_NAME_MAX_CHARS: usize = 255;

/// Field-level validation failure for entity construction or rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    Empty,
    TooShort,
    TooLong,
    /// The comparison key outgrew its column after upper-casing.
    NormalizedTooLong,
    /// Project construction received the nil client id.
    MissingClientId,
}

impl Display for NameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty."),
            Self::TooShort => write!(f, "Name must have at least {NAME_MIN_CHARS} characters."),
            Self::TooLong => write!(f, "Name must have at most {NAME_MAX_CHARS} characters."),
            Self::NormalizedTooLong => write!(
                f,
                "Normalized name must have at most {NORMALIZED_NAME_MAX_CHARS} characters."
            ),
            Self::MissingClientId => write!(f, "ClientId must be provided."),
        }
    }
}

impl Error for NameValidationError {}

/// Validated pair of trimmed display name and its comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidName {
    pub name: String,
    pub normalized: String,
}

/// Applies the name rules in order: empty, too short, too long, then the
/// same empty/length limits on the normalized key.
///
/// A name made only of non-spacing marks normalizes to `""` and is reported
/// as empty.
pub(crate) fn validate_name(raw: &str) -> Result<ValidName, NameValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty);
    }

    let char_count = trimmed.chars().count();
    if char_count < NAME_MIN_CHARS {
        return Err(NameValidationError::TooShort);
    }
    if char_count > NAME_MAX_CHARS {
        return Err(NameValidationError::TooLong);
    }

    let normalized = normalize(trimmed);
    if normalized.is_empty() {
        return Err(NameValidationError::Empty);
    }
    if normalized.chars().count() > NORMALIZED_NAME_MAX_CHARS {
        return Err(NameValidationError::NormalizedTooLong);
    }

    Ok(ValidName {
        name: trimmed.to_string(),
        normalized,
    })
}

#[cfg(test)]
mod tests {
    use super::{validate_name, NameValidationError, NAME_MAX_CHARS, NORMALIZED_NAME_MAX_CHARS};

    #[test]
    fn empty_check_runs_before_length_check() {
        assert_eq!(validate_name("   "), Err(NameValidationError::Empty));
        assert_eq!(validate_name(" ab "), Err(NameValidationError::TooShort));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let valid = validate_name("Çaé").expect("three chars should pass");
        assert_eq!(valid.name, "Çaé");
        assert_eq!(valid.normalized, "CAE");

        let too_long = "é".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(validate_name(&too_long), Err(NameValidationError::TooLong));
        assert!(validate_name(&"é".repeat(NAME_MAX_CHARS)).is_ok());
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(NameValidationError::Empty.to_string(), "Name cannot be empty.");
        assert_eq!(
            NameValidationError::TooShort.to_string(),
            "Name must have at least 3 characters."
        );
    }

    #[test]
    fn marks_only_name_is_empty() {
        assert_eq!(
            validate_name("\u{301}\u{301}\u{301}"),
            Err(NameValidationError::Empty)
        );
    }

    #[test]
    fn normalized_key_length_is_bounded() {
        let expanding = "ß".repeat(NAME_MAX_CHARS);
        assert_eq!(
            validate_name(&expanding),
            Err(NameValidationError::NormalizedTooLong)
        );

        let at_limit = "ß".repeat(NORMALIZED_NAME_MAX_CHARS / 2);
        let valid = validate_name(&at_limit).expect("key within limit");
        assert_eq!(valid.normalized.chars().count(), 254);
        assert_eq!(valid.name.chars().count(), 127);
    }
}

//! Field validation for lookup and sketch input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of a lookup name.
pub const MAX_NAME_LEN: u64 = 100;
/// Maximum length of a sketch title.
pub const MAX_TITLE_LEN: u64 = 200;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid regex")
});

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[a-zA-Z0-9.+-]+(?:;[a-zA-Z0-9=._-]+)*,").expect("valid regex")
});

/// Trim a required text field and reject it if nothing is left.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Normalise an optional hex color. Blank input is treated as absent.
pub fn normalize_hex(value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(hex) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if HEX_COLOR.is_match(hex) {
        Ok(Some(hex.to_lowercase()))
    } else {
        Err(CoreError::Validation(format!(
            "hex must be a color like #rrggbb, got '{hex}'"
        )))
    }
}

/// Check that a sketch image is an `image/*` data URI.
pub fn validate_image(value: &str) -> Result<(), CoreError> {
    if DATA_URI.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "image must be a data URI with an image/* media type".into(),
        ))
    }
}

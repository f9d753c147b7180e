use std::sync::LazyLock;

use regex::Regex;

use crate::error::SessionError;

pub const NAME_MAX_LENGTH: usize = 50;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _-]*$").expect("valid name pattern"));

static CONSECUTIVE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace pattern"));

/// Checks a session display name and hands it back on success.
pub fn validate_session_name(name: &str) -> Result<String, SessionError> {
    if name.trim().is_empty() {
        return Err(SessionError::InvalidName(
            "Session name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(SessionError::InvalidName(format!(
            "Session name cannot be longer than {} characters",
            NAME_MAX_LENGTH
        )));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(SessionError::InvalidName(
            "Session name must start with a letter or number and can only contain letters, numbers, spaces, hyphens, or underscores".to_string(),
        ));
    }
    if CONSECUTIVE_WHITESPACE.is_match(name) {
        return Err(SessionError::InvalidName(
            "Session name cannot contain consecutive spaces".to_string(),
        ));
    }
    Ok(name.to_string())
}

//! Token format checks, run before any request is made

use crate::types::{Notice, NoticeLevel};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sk-[a-zA-Z0-9]{48}$").expect("token pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Please enter the token before querying")]
    Empty,

    #[error("Illegal token format!")]
    InvalidFormat,
}

impl TokenError {
    /// An empty field is a nudge, a malformed token is an error
    pub fn level(&self) -> NoticeLevel {
        match self {
            TokenError::Empty => NoticeLevel::Warning,
            TokenError::InvalidFormat => NoticeLevel::Error,
        }
    }

    pub fn to_notice(&self) -> Notice {
        Notice::new(self.level(), self.to_string())
    }
}

/// Check that `token` is `sk-` followed by exactly 48 ASCII alphanumerics
pub fn validate(token: &str) -> Result<(), TokenError> {
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    if !TOKEN_PATTERN.is_match(token) {
        return Err(TokenError::InvalidFormat);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_token() -> String {
        format!("sk-{}", "aB3".repeat(16))
    }

    #[test]
    fn test_validate_accepts_well_formed_token() {
        assert_eq!(valid_token().len(), 51);
        assert_eq!(validate(&valid_token()), Ok(()));
    }

    #[test]
    fn test_validate_empty_is_warning() {
        let err = validate("").unwrap_err();
        assert_eq!(err, TokenError::Empty);
        assert_eq!(err.level(), NoticeLevel::Warning);
    }

    #[test]
    fn test_validate_wrong_length() {
        let short = format!("sk-{}", "a".repeat(47));
        let long = format!("sk-{}", "a".repeat(49));
        assert_eq!(validate(&short), Err(TokenError::InvalidFormat));
        assert_eq!(validate(&long), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn test_validate_wrong_prefix() {
        let token = format!("pk-{}", "a".repeat(48));
        assert_eq!(validate(&token), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        let dashed = format!("sk-{}-", "a".repeat(47));
        let unicode = format!("sk-{}é", "a".repeat(47));
        let padded = format!(" {}", valid_token());
        assert_eq!(validate(&dashed), Err(TokenError::InvalidFormat));
        assert_eq!(validate(&unicode), Err(TokenError::InvalidFormat));
        assert_eq!(validate(&padded), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn test_invalid_format_is_error_notice() {
        let notice = TokenError::InvalidFormat.to_notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Illegal token format!");
    }
}

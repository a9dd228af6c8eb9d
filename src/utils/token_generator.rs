//! Short token generation and alias validation.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length of generated tokens.
pub const TOKEN_LENGTH: usize = 6;

/// Maximum length of a user-chosen alias.
pub const MAX_ALIAS_LENGTH: usize = 20;

/// Base-36 alphabet used for generated tokens.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Aliases that would shadow a fixed route.
const RESERVED_ALIASES: &[&str] = &["shorten", "health", "info", "delete", "analytics"];

/// Generates a random 6-character base-36 token.
///
/// Uses the thread-local non-cryptographic RNG. Tokens are not guaranteed to
/// be unique; callers check for collisions before storing.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-20 characters
/// - Allowed characters: the URL-unreserved set, i.e. ASCII letters, digits,
///   `-`, `_`, `.` and `~` (case-sensitive)
/// - Cannot be `.` or `..`, which clients collapse as path segments
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.chars().count() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias must be 1-20 characters",
            json!({ "provided_length": alias.chars().count() }),
        ));
    }

    if !alias.chars().all(is_unreserved) {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits and - _ . ~",
            json!({ "alias": alias }),
        ));
    }

    if alias == "." || alias == ".." || RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

//! Reserved token-text syntax and item splitting.

use tabula_foundation::{Error, Result};

/// Global clear: removes the whole field content. Valid only as the first item.
pub const CLEAR: &str = ".CLEAR";

/// Targeted removal prefix: `.CLEAR.<ref>`.
pub const CLEAR_DOT: &str = ".CLEAR.";

/// The usual item separator.
pub const PIPE: char = '|';

/// Splits a token value into items, rejecting malformed separators.
///
/// An empty value, a leading or trailing separator, and two separators in a
/// row are all parse conflicts for `token`.
///
/// # Errors
///
/// Returns a parse conflict describing the first problem found.
pub fn split_items<'v>(token: &str, value: &'v str, separator: char) -> Result<Vec<&'v str>> {
    if value.is_empty() {
        return Err(Error::parse_conflict(token, "may not have an empty value", value));
    }
    if value.starts_with(separator) {
        return Err(Error::parse_conflict(
            token,
            format!("may not start with {separator}"),
            value,
        ));
    }
    if value.ends_with(separator) {
        return Err(Error::parse_conflict(
            token,
            format!("may not end with {separator}"),
            value,
        ));
    }
    let items: Vec<&str> = value.split(separator).collect();
    if items.iter().any(|item| item.is_empty()) {
        return Err(Error::parse_conflict(
            token,
            format!("contains {separator}{separator} (empty item)"),
            value,
        ));
    }
    Ok(items)
}

//! Common display helpers

use crate::client::Attribute;

/// Placeholder for unknown or null values
pub const NONE: &str = "--";

/// Truncate string to max length (in characters) with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a known value, or the placeholder
pub fn show<T: ToString>(attr: &Attribute<T>) -> String {
    attr.known()
        .map(ToString::to_string)
        .unwrap_or_else(|| NONE.to_string())
}

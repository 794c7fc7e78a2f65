//! Utility functions for rendering text.
//!
//! This module provides helpers used throughout the bot to turn JSON values
//! into display text and to cut text on character boundaries, since Discord
//! limits are expressed in characters rather than bytes.

use serde_json::Value;

/// Renders a JSON value as display text.
///
/// Strings are rendered without quotes, `null` as an empty string and every
/// other value as its JSON representation.
///
/// # Examples
///
/// ```
/// # use craftybot::utils::value_text;
/// # use serde_json::json;
/// assert_eq!(value_text(&json!("abc")), "abc");
/// assert_eq!(value_text(&json!(25565)), "25565");
/// ```
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Returns the first `count` characters of `text`.
pub fn head_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Returns the last `count` characters of `text`.
pub fn tail_chars(text: &str, count: usize) -> &str {
    let length = text.chars().count();
    if length <= count {
        return text;
    }
    match text.char_indices().nth(length - count) {
        Some((index, _)) => &text[index..],
        None => "",
    }
}

/// Shortens `text` to `keep` leading and `keep` trailing characters joined by
/// `...` when it is longer than `max` characters.
///
/// # Examples
///
/// ```
/// # use craftybot::utils::shorten_middle;
/// let id = "0c1a6a54-93f9-4e7b-bb37-3c2a6e2e4b10";
/// assert_eq!(shorten_middle(id, 20, 8), "0c1a6a54...6e2e4b10");
/// ```
pub fn shorten_middle(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    format!("{}...{}", head_chars(text, keep), tail_chars(text, keep))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("s1")), "s1");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_head_chars() {
        assert_eq!(head_chars("abcdef", 3), "abc");
        assert_eq!(head_chars("abc", 10), "abc");
        assert_eq!(head_chars("", 2), "");
    }

    #[test]
    fn test_head_chars_multibyte() {
        assert_eq!(head_chars("ééé", 2), "éé");
    }

    #[test]
    fn test_tail_chars() {
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(tail_chars("abc", 3), "abc");
        assert_eq!(tail_chars("abc", 10), "abc");
        assert_eq!(tail_chars("abc", 0), "");
    }

    #[test]
    fn test_tail_chars_multibyte() {
        assert_eq!(tail_chars("a€b€c", 3), "b€c");
    }

    #[test]
    fn test_shorten_middle_short_text() {
        assert_eq!(shorten_middle("server-1", 20, 8), "server-1");
    }

    #[test]
    fn test_shorten_middle_long_text() {
        assert_eq!(
            shorten_middle("0c1a6a54-93f9-4e7b-bb37-3c2a6e2e4b10", 20, 8),
            "0c1a6a54...6e2e4b10"
        );
    }
}

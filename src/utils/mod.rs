//! Utility functions and helpers.

pub mod fs;
pub mod http;
pub mod report;

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

static CONTROL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\t\r]+").expect("static pattern compiles"));

/// Replace every run of tab, newline and carriage return with `replacement`.
pub fn collapse_control_whitespace(text: &str, replacement: &str) -> String {
    CONTROL_WHITESPACE.replace_all(text, replacement).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.product").is_ok());
        assert!(parse_selector("h2 a").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_collapse_control_whitespace() {
        assert_eq!(collapse_control_whitespace("Ro\nuter\t1", " "), "Ro uter 1");
        assert_eq!(collapse_control_whitespace("a\r\n\t\tb", " "), "a b");
        assert_eq!(collapse_control_whitespace("http://x\n/y.png\r\n", ""), "http://x/y.png");
        assert_eq!(collapse_control_whitespace("keep  spaces", " "), "keep  spaces");
    }
}

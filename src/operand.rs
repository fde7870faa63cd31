//! Operand parsing for raw field text.
//!
//! Parsing is lenient: the longest numeric prefix wins and anything after it
//! is ignored. Text with no numeric prefix yields NaN, which callers forward
//! unchanged.

use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Whitespace skipped before a number: the ECMAScript `StrWhiteSpaceChar` set.
fn is_leading_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Parses a field value the way a form input is read: `"3abc"` is 3, `""` is NaN.
pub fn parse_operand(raw: &str) -> f64 {
    let trimmed = raw.trim_start_matches(is_leading_whitespace);

    NUMERIC_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

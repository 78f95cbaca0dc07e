//! Whole-string regex helpers shared by parameter matching and selectors.

use regex::Regex;

/// Prefix marking a parameter value as a pattern.
pub const REGEX_PREFIX: &str = "regex:";

/// Compile `pattern` so that it only matches an entire input string.
pub fn compile_full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// Extract the pattern carried by a `regex:`-prefixed value.
///
/// Only the first `:`-delimited segment after the prefix is kept, so
/// `regex:a:b` yields `a`. Returns `None` for values without the prefix.
pub fn pattern_of(value: &str) -> Option<&str> {
    let rest = value.strip_prefix(REGEX_PREFIX)?;
    Some(rest.split(':').next().unwrap_or_default())
}

//! Placeholder extraction and prompt assembly
//!
//! Placeholders use triple braces: `{{{name}}}`, where `name` is any
//! non-empty run of characters other than `}`. Anything that does not match
//! (including an unterminated `{{{`) is plain text and passes through.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Regex to match placeholders: {{{name}}}
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\{([^}]+)\}\}\}").unwrap());

const PLACEHOLDER_OPEN: &str = "{{{";

/// Variable name to value mapping used for assembly
pub type VariableValues = HashMap<String, String>;

/// Extract the distinct variable names referenced by a body, in order of
/// first appearance
pub fn extract_variables(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variables = Vec::new();

    for cap in PLACEHOLDER_PATTERN.captures_iter(body) {
        let name = &cap[1];

        if seen.insert(name.to_string()) {
            variables.push(name.to_string());
        }
    }

    variables
}

/// Substitute `values` into every placeholder of `body`.
///
/// Names without a value are replaced with the empty string. Values are
/// inserted verbatim, so placeholders inside a value are not expanded.
pub fn assemble(body: &str, values: &VariableValues) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(body, |cap: &Captures| {
            values.get(&cap[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Number of `{{{` openers that never formed a valid placeholder
pub fn count_unterminated(body: &str) -> usize {
    PLACEHOLDER_PATTERN
        .replace_all(body, "")
        .matches(PLACEHOLDER_OPEN)
        .count()
}

//! Template variables embedded in text content as `{{name}}`.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::Element;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}\}")
            .expect("invalid placeholder regex")
    })
}

/// True if `content` contains at least one `{{...}}` placeholder.
pub fn has_placeholder(content: &str) -> bool {
    placeholder_re().is_match(content)
}

/// Variable names in `content`, in first-seen order.
pub fn variables_in(content: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for cap in placeholder_re().captures_iter(content) {
        let name = &cap[1];
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Deduplicated variable names across all text elements.
pub fn extract_variables(elements: &[Element]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for element in elements.iter().filter(|e| e.is_text()) {
        let Some(content) = element.content() else {
            continue;
        };
        for name in variables_in(content) {
            if !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out
}

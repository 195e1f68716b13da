//! Person-name heuristics for schedule rows.
//!
//! # Invariants
//! - Names never contain digits (codes and numeric noise are rejected).
//! - A name has at least two whitespace-separated letter-bearing tokens.
//! - `normalize_name` is the only key format used for person lookups.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));
static LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zÁÉÍÓÚÜÑáéíóúüñ]").expect("valid letter regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns whether a raw cell string looks like a person's name.
pub fn is_person_name(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() || DIGIT_RE.is_match(trimmed) {
        return false;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }

    let letter_tokens = tokens
        .iter()
        .filter(|token| LETTER_RE.is_match(token))
        .count();
    letter_tokens >= 2
}

/// Collapses whitespace runs, trims and upper-cases a name.
pub fn normalize_name(raw: &str) -> String {
    WHITESPACE_RE
        .replace_all(raw.trim(), " ")
        .to_uppercase()
}

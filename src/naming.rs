//! Centralized display-casing for section keys.
//!
//! Section keys are directory-style identifiers (`user-manual`, `api_notes`,
//! `developerGuide`) and double as display titles when a summary document
//! doesn't define one. This module provides the single conversion used
//! everywhere a key is shown to a reader:
//!
//! - `user-manual` → "User Manual"
//! - `api_notes` → "Api Notes"
//! - `developerGuide` → "Developer Guide"

/// Convert a section key to a display title.
///
/// Splits on dashes, underscores, and lowercase→uppercase camelCase
/// boundaries, then uppercases the first letter of each word. Existing
/// interior capitals are preserved (`APIGuide` stays one word — a split
/// happens only where a lowercase letter precedes an uppercase one).
pub fn display_title(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '-' || c == '_' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        } else if c.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
            current.push(c);
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase();
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_key() {
        assert_eq!(display_title("user-manual"), "User Manual");
    }

    #[test]
    fn snake_case_key() {
        assert_eq!(display_title("api_notes"), "Api Notes");
    }

    #[test]
    fn camel_case_key() {
        assert_eq!(display_title("developerGuide"), "Developer Guide");
    }

    #[test]
    fn single_word_key() {
        assert_eq!(display_title("wiki"), "Wiki");
    }

    #[test]
    fn already_capitalized() {
        assert_eq!(display_title("User-Manual"), "User Manual");
    }

    #[test]
    fn interior_acronym_stays_together() {
        assert_eq!(display_title("APIGuide"), "APIGuide");
    }

    #[test]
    fn mixed_separators() {
        assert_eq!(display_title("user-manual_v2"), "User Manual V2");
    }

    #[test]
    fn empty_key() {
        assert_eq!(display_title(""), "");
    }
}

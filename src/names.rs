//! Application name validation and derivation.
//! Turns a raw user-supplied name into the three forms substituted into the
//! generated tree, and applies the ordered token replacement itself.

use crate::config::TemplateTokens;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\s]+$").expect("valid name pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// The three name forms derived from the raw application name.
///
/// Derived once per run and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetNames {
    /// Identifier form: lowercased, whitespace runs become underscores
    pub snake: String,
    /// Slug form: lowercased, whitespace runs become hyphens
    pub kebab: String,
    /// Human-readable form: whitespace-normalized and title-cased
    pub display: String,
}

/// Checks whether a raw application name is acceptable.
///
/// A name is valid when it is non-empty after trimming and contains only
/// letters, digits and whitespace.
pub fn is_valid_name(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && VALID_NAME.is_match(trimmed)
}

impl TargetNames {
    /// Derives the snake, kebab and display forms from a raw name.
    ///
    /// # Errors
    /// * `Error::InvalidNameError` if the name fails validation
    pub fn derive(raw: &str) -> Result<Self> {
        if !is_valid_name(raw) {
            return Err(Error::InvalidNameError { name: raw.to_string() });
        }

        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();

        Ok(Self {
            snake: WHITESPACE.replace_all(&lowered, "_").into_owned(),
            kebab: WHITESPACE.replace_all(&lowered, "-").into_owned(),
            display: title_case(trimmed),
        })
    }
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces template tokens in a file or directory base name.
///
/// Only the snake and kebab tokens appear in paths; the display token is
/// never substituted into names. Snake is replaced before kebab.
pub fn rename_entry(name: &str, tokens: &TemplateTokens, target: &TargetNames) -> String {
    name.replace(&tokens.snake, &target.snake).replace(&tokens.kebab, &target.kebab)
}

/// Replaces template tokens in text content.
///
/// Replacement order is fixed: snake, then kebab, then display. The narrower
/// tokens must be gone before the display token is substituted.
pub fn rewrite_content(text: &str, tokens: &TemplateTokens, target: &TargetNames) -> String {
    text.replace(&tokens.snake, &target.snake)
        .replace(&tokens.kebab, &target.kebab)
        .replace(&tokens.display, &target.display)
}

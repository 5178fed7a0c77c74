//! Input validation for shoot brief submissions
//!
//! Runs before any network call: a submission without a primary description,
//! or (when the topic check is on) one unrelated to filming, never reaches the
//! gateway.

use thiserror::Error;

/// Filming vocabulary, English and Ukrainian. Matched as lower-case substrings.
pub const FILMING_KEYWORDS: &[&str] = &[
    "film",
    "shoot",
    "shooting",
    "video",
    "scene",
    "camera",
    "actor",
    "actress",
    "podcast",
    "interview",
    "commercial",
    "movie",
    "зйомка",
    "знімати",
    "фільм",
    "відео",
    "сцена",
    "камера",
    "актор",
    "актриса",
    "подкаст",
    "інтерв'ю",
    "реклама",
    "кіно",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Будь ласка, введіть основний запит для зображення.")]
    MissingPrompt,

    #[error("Вкажіть запит, який стосується зйомки")]
    OffTopic,
}

#[derive(Debug, Clone, Copy)]
pub struct BriefValidator {
    topic_check: bool,
}

impl BriefValidator {
    pub fn new(topic_check: bool) -> Self {
        Self { topic_check }
    }

    /// Validate a primary description, returning it trimmed.
    pub fn validate<'a>(&self, main_prompt: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = main_prompt.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingPrompt);
        }

        if self.topic_check && !is_filming_related(trimmed) {
            return Err(ValidationError::OffTopic);
        }

        Ok(trimmed)
    }
}

impl Default for BriefValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

/// True when the lower-cased text contains any of [`FILMING_KEYWORDS`].
pub fn is_filming_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    FILMING_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

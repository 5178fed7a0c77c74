//! Data models and structures
//!
//! Defines the generation request/response envelopes exchanged over
//! `POST /api/generateFrame`, plus runtime configuration.

use crate::ai::openai::chat::DEFAULT_CHAT_MODEL;
use crate::ai::openai::client::DEFAULT_BASE_URL;
use crate::ai::openai::image::DEFAULT_IMAGE_MODEL;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which provider operation a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Image,
    Text,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Image => f.write_str("image"),
            GenerationMode::Text => f.write_str("text"),
        }
    }
}

impl FromStr for GenerationMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(GenerationMode::Image),
            "text" => Ok(GenerationMode::Text),
            other => Err(crate::Error::Config(format!(
                "Unknown generation mode '{}'. Expected 'image' or 'text'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_query",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GenerationMode>,
}

/// Falsy JSON values (`null`, `false`, `0`, `""`) read as a missing query.
/// Other non-string values are kept as their JSON text.
fn deserialize_query<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

impl GenerationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Successful generation payload. The variant follows the generation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Image {
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
    Text {
        result: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub image_model: String,
    pub chat_model: String,
    pub generation_mode: GenerationMode,
    pub topic_check: bool,
}

impl Config {
    /// Read configuration from the process environment. `.env` loading is
    /// left to the binary.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys take the
    /// provider clients' defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        Ok(Self {
            openai_api_key: lookup("OPENAI_API_KEY")
                .ok_or_else(|| crate::Error::Config("OPENAI_API_KEY not set".to_string()))?,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            image_model: lookup("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            generation_mode: match lookup("GENERATION_MODE") {
                Some(value) => value.parse()?,
                None => GenerationMode::Image,
            },
            topic_check: match lookup("TOPIC_CHECK") {
                Some(value) => parse_bool(&value)?,
                None => true,
            },
        })
    }
}

fn parse_bool(value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(crate::Error::Config(format!(
            "Invalid boolean '{}' for TOPIC_CHECK",
            other
        ))),
    }
}

//! AI service integration for frame generation
//!
//! Provides provider-neutral interfaces for image generation and chat-style
//! frame descriptions, an OpenAI-compatible implementation of each, and
//! in-memory mocks for tests.

pub mod mock;
pub mod openai;

pub use mock::{MockChatClient, MockImageGenerationClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate one image for `prompt` and return its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Describe the camera, lighting and composition of a frame for `query`.
    async fn describe_frame(&self, query: &str) -> Result<String>;
}

use super::{ChatService, ImageGenerationService};
use crate::error::ApiError;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub const DEFAULT_MOCK_IMAGE_URL: &str = "https://mock-images.example.com/frame.png";

/// Scripted outcome for a mock call.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Api(ApiError),
    Failure(String),
}

impl MockOutcome {
    fn into_result(self) -> Result<String> {
        match self {
            MockOutcome::Success(value) => Ok(value),
            MockOutcome::Api(err) => Err(Error::Api(err)),
            MockOutcome::Failure(message) => Err(Error::AiProvider(message)),
        }
    }
}

#[derive(Default)]
struct MockState {
    outcomes: Vec<MockOutcome>,
    prompts: Vec<String>,
    call_count: usize,
}

impl MockState {
    /// Record the call and pick the next scripted outcome, cycling.
    fn next(&mut self, prompt: &str) -> Option<MockOutcome> {
        self.call_count += 1;
        self.prompts.push(prompt.to_string());
        if self.outcomes.is_empty() {
            None
        } else {
            let index = (self.call_count - 1) % self.outcomes.len();
            Some(self.outcomes[index].clone())
        }
    }
}

#[derive(Clone, Default)]
pub struct MockImageGenerationClient {
    state: Arc<Mutex<MockState>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_url(self, url: String) -> Self {
        self.push(MockOutcome::Success(url))
    }

    pub fn with_api_error(self, error: ApiError) -> Self {
        self.push(MockOutcome::Api(error))
    }

    pub fn with_failure(self, message: String) -> Self {
        self.push(MockOutcome::Failure(message))
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.state.lock().unwrap().outcomes.push(outcome);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.state.lock().unwrap().call_count
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let outcome = self.state.lock().unwrap().next(prompt);
        match outcome {
            Some(outcome) => outcome.into_result(),
            None => Ok(DEFAULT_MOCK_IMAGE_URL.to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockChatClient {
    state: Arc<Mutex<MockState>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(self, description: String) -> Self {
        self.push(MockOutcome::Success(description))
    }

    pub fn with_api_error(self, error: ApiError) -> Self {
        self.push(MockOutcome::Api(error))
    }

    pub fn with_failure(self, message: String) -> Self {
        self.push(MockOutcome::Failure(message))
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.state.lock().unwrap().outcomes.push(outcome);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.state.lock().unwrap().call_count
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn describe_frame(&self, query: &str) -> Result<String> {
        let outcome = self.state.lock().unwrap().next(query);
        match outcome {
            Some(outcome) => outcome.into_result(),
            None => Ok(format!("Frame description for: {}", query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_image_client_default_url() {
        let client = MockImageGenerationClient::new();
        let url = client.generate_image("a scene").await.unwrap();
        assert_eq!(url, DEFAULT_MOCK_IMAGE_URL);
        assert_eq!(client.get_prompts(), vec!["a scene".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_image_client_cycles_outcomes() {
        let client = MockImageGenerationClient::new()
            .with_image_url("https://img/1.png".to_string())
            .with_api_error(ApiError::new(Some(429), "Rate limited"));

        assert_eq!(client.generate_image("a").await.unwrap(), "https://img/1.png");
        let err = client.generate_image("b").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError { status: Some(429), .. })));

        // Should cycle back
        assert_eq!(client.generate_image("c").await.unwrap(), "https://img/1.png");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_chat_client_default_and_failure() {
        let client = MockChatClient::new();
        let text = client.describe_frame("podcast set").await.unwrap();
        assert!(text.contains("podcast set"));

        let failing = MockChatClient::new().with_failure("boom".to_string());
        let err = failing.describe_frame("x").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_mock_clones_share_call_count() {
        let client = MockChatClient::new();
        let probe = client.clone();

        client.describe_frame("one").await.unwrap();
        client.describe_frame("two").await.unwrap();
        assert_eq!(probe.get_call_count(), 2);
    }
}

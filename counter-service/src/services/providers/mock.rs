//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text.
    Text(String),
    /// Return a response without any text.
    Empty,
    /// Fail as if the upstream API returned an error.
    Fail,
}

/// A single recorded `generate` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub params: GenerationParams,
}

/// Mock text provider that records every call it receives.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always returns `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Text(text.into()))
    }

    /// Mock that always fails.
    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail)
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                params: params.clone(),
            });
        }

        let text = match &self.behavior {
            MockBehavior::Text(text) => Some(text.clone()),
            MockBehavior::Empty => None,
            MockBehavior::Fail => {
                return Err(ProviderError::ApiError(
                    "Mock provider configured to fail".to_string(),
                ))
            }
        };

        Ok(ProviderResponse {
            text,
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

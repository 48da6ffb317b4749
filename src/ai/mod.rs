//! Text Generation Collaborator
//!
//! The assistant features forward user text to a hosted generative-language
//! service and display whatever text comes back. The service sits behind the
//! [`TextGenerator`] trait; components receive it through an explicit
//! [`AiHandle`] chosen once at startup.
//!
//! ## Contract
//!
//! - In: prompt text, optional system instruction, optional search grounding
//! - Out: generated text plus optional web sources
//! - Failure: [`AiError`], whose message is shown to the user verbatim
//!
//! No retry, no cancellation. Callers issue one request at a time per view.

mod gemini;
pub mod prompts;

pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::chat::GroundingSource;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A single generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// Ask the service to ground the answer with web search
    pub use_search: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            use_search: false,
        }
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.use_search = enabled;
        self
    }
}

/// Generated text and the sources it was grounded on
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateResult {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

/// Anything that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Generate a response for the request
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, AiError>;
}

/// The collaborator handle threaded into sessions and API state
#[derive(Clone)]
pub enum AiHandle {
    Configured(Arc<dyn TextGenerator>),
    Unconfigured,
}

impl AiHandle {
    pub fn configured(generator: impl TextGenerator + 'static) -> Self {
        AiHandle::Configured(Arc::new(generator))
    }

    /// Build the Gemini collaborator when an API key is present
    pub fn from_gemini_config(config: GeminiConfig) -> Result<Self, AiError> {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                let client = GeminiClient::new(config)?;
                tracing::info!(model = %client.model(), "Text generation configured");
                Ok(AiHandle::configured(client))
            }
            _ => {
                tracing::warn!("No API key found; AI features are disabled");
                Ok(AiHandle::Unconfigured)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, AiHandle::Configured(_))
    }

    /// Forward the request, or fail with [`AiError::Unconfigured`]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, AiError> {
        match self {
            AiHandle::Configured(generator) => {
                tracing::debug!(
                    generator = generator.name(),
                    prompt_len = request.prompt.len(),
                    use_search = request.use_search,
                    "Sending generation request"
                );
                let result = generator.generate(request).await;
                if let Err(e) = &result {
                    tracing::error!(generator = generator.name(), error = %e, "Generation failed");
                }
                result
            }
            AiHandle::Unconfigured => Err(AiError::Unconfigured),
        }
    }
}

impl fmt::Debug for AiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiHandle::Configured(generator) => {
                f.debug_tuple("Configured").field(&generator.name()).finish()
            }
            AiHandle::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Errors talking to the text-generation service
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI service is not available. Please ensure the API key is configured.")]
    Unconfigured,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}


#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_handle_fails() {
        let err = AiHandle::Unconfigured
            .generate(&GenerateRequest::new("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Unconfigured));
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn test_configured_handle_forwards() {
        let generator = Arc::new(ScriptedGenerator::new().reply("hello"));
        let handle = handle(Arc::clone(&generator));
        let request = GenerateRequest::new("hi").system_instruction("be nice");

        let result = handle.generate(&request).await.unwrap();
        assert_eq!(result.text, "hello");
        assert_eq!(generator.requests.lock().unwrap()[0], request);
    }

    #[test]
    fn test_missing_key_is_unconfigured() {
        let handle = AiHandle::from_gemini_config(GeminiConfig::default()).unwrap();
        assert!(!handle.is_configured());

        let config = GeminiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!AiHandle::from_gemini_config(config).unwrap().is_configured());
    }

    #[test]
    fn test_present_key_is_configured() {
        let config = GeminiConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let handle = AiHandle::from_gemini_config(config).unwrap();
        assert!(handle.is_configured());
        assert_eq!(format!("{:?}", handle), "Configured(\"gemini\")");
    }
}

//! Gemini REST Client
//!
//! Minimal client for the `generateContent` endpoint of the Gemini API.

use super::{AiError, GenerateRequest, GenerateResult, TextGenerator};
use crate::chat::GroundingSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";

const UNKNOWN_SOURCE_TITLE: &str = "Unknown source";

/// The key travels in a header so it never appears in URLs or error messages
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

/// Configuration for the Gemini client
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    /// API root, without a trailing slash
    pub base_url: String,
    pub model: String,
    /// Optional request timeout. `None` waits for as long as the service takes.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl GeminiClient {
    /// Create a client with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(text.clone()),
                }],
            }),
            tools: request.use_search.then(|| {
                vec![GeminiTool {
                    google_search: EmptyObject {},
                }]
            }),
        }
    }

    /// Pull text and (when grounding was requested) sources out of a response
    fn extract_result(
        response: GeminiResponse,
        use_search: bool,
    ) -> Result<GenerateResult, AiError> {
        if let Some(error) = response.error {
            return Err(AiError::Api {
                status: error.code.unwrap_or(500),
                message: error.message,
            });
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidResponse("no candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let sources = if use_search {
            candidate.grounding_metadata.map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| GroundingSource {
                        uri: web.uri.unwrap_or_default(),
                        title: web
                            .title
                            .filter(|t| !t.is_empty())
                            .unwrap_or_else(|| UNKNOWN_SOURCE_TITLE.to_string()),
                    })
                    .collect()
            })
        } else {
            None
        };

        Ok(GenerateResult { text, sources })
    }

    /// Turn a non-2xx body into an error carrying the service's own message
    fn api_error(status: u16, body: &str) -> AiError {
        let message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .unwrap_or_else(|| body.to_string());

        AiError::Api { status, message }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::Unconfigured)?;
        let body = Self::build_request(request);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::Request(e)
                }
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        let result = Self::extract_result(parsed, request.use_search)?;
        tracing::debug!(
            model = %self.config.model,
            text_len = result.text.len(),
            sources = result.sources.as_ref().map_or(0, Vec::len),
            "Received generation response"
        );
        Ok(result)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    code: Option<u16>,
    message: String,
}

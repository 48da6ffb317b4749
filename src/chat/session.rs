//! Chat Session
//!
//! State owned by one Health Q&A conversation: the append-only message log,
//! the busy flag and the last collaborator error.

use super::message::ChatMessage;
use crate::ai::{prompts, AiError, AiHandle, GenerateRequest, GenerateResult};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Why a turn was refused before reaching the collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyInput,

    #[error("a response is already being generated for this conversation")]
    Busy,

    #[error("AI service is not available. Please ensure the API key is configured.")]
    Unconfigured,
}

/// One conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    busy: bool,
    last_error: Option<String>,
    #[serde(skip)]
    use_search: bool,
}

impl ChatSession {
    /// Start a conversation. It opens with a greeting when the collaborator is configured.
    pub fn new(ai: &AiHandle) -> Self {
        let mut messages = Vec::new();
        if ai.is_configured() {
            messages.push(ChatMessage::assistant(prompts::CHAT_GREETING, None));
        }

        Self {
            id: Uuid::new_v4(),
            messages,
            busy: false,
            last_error: None,
            use_search: false,
        }
    }

    /// Request search grounding for every turn
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.use_search = enabled;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record the user's message and mark the session busy.
    ///
    /// Returns the request to hand to the collaborator. Every successful call
    /// must be followed by exactly one [`finish_turn`](Self::finish_turn).
    pub fn begin_turn(&mut self, input: &str) -> Result<GenerateRequest, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.busy {
            return Err(ChatError::Busy);
        }

        self.messages.push(ChatMessage::user(input));
        self.busy = true;
        self.last_error = None;

        Ok(GenerateRequest::new(input)
            .system_instruction(prompts::health_qa_instruction())
            .with_search(self.use_search))
    }

    /// Append the collaborator's answer, or a system error notice, and clear busy
    pub fn finish_turn(&mut self, result: Result<GenerateResult, AiError>) -> &ChatMessage {
        let message = match result {
            Ok(result) => ChatMessage::assistant(result.text, result.sources),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(session_id = %self.id, error = %message, "Chat turn failed");
                let notice = format!(
                    "Error: {}. Please check your connection or API key.",
                    message
                );
                self.last_error = Some(message);
                ChatMessage::system(notice)
            }
        };

        self.busy = false;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Run one full turn against the collaborator
    pub async fn send(&mut self, input: &str, ai: &AiHandle) -> Result<&ChatMessage, ChatError> {
        if !ai.is_configured() {
            return Err(ChatError::Unconfigured);
        }

        let request = self.begin_turn(input)?;
        tracing::debug!(session_id = %self.id, "Chat turn started");
        let result = ai.generate(&request).await;
        Ok(self.finish_turn(result))
    }
}

//! # Health Saarthi
//!
//! An AI-assisted health companion: a general health Q&A chat and a
//! personalized wellness planner, backed by a hosted text-generation service.
//!
//! ## Features
//!
//! - **Body metrics**: BMI, Mifflin-St Jeor BMR and activity-scaled TDEE
//! - **Wellness planner**: form validation, metric computation and a structured prompt
//! - **Health Q&A**: multi-turn chat with optional web-search grounding
//! - **Safe rendering**: generated text becomes typed nodes, never raw markup
//!
//! ## Modules
//!
//! - [`wellness`]: Metric calculator and planner session
//! - [`chat`]: Chat messages and conversation state
//! - [`ai`]: Text-generation collaborator and the Gemini adapter
//! - [`render`]: Response text to display nodes, HTML and terminal presenters
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use health_saarthi::ai::{AiHandle, GeminiConfig};
//! use health_saarthi::chat::ChatSession;
//! use health_saarthi::render::render_block;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ai = AiHandle::from_gemini_config(GeminiConfig {
//!         api_key: std::env::var("GEMINI_API_KEY").ok(),
//!         ..Default::default()
//!     })?;
//!
//!     let mut session = ChatSession::new(&ai);
//!     let reply = session.send("How much water should I drink?", &ai).await?;
//!
//!     for node in render_block(&reply.text) {
//!         println!("{}", node.plain_text());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod chat;
pub mod config;
pub mod logging;
pub mod render;
pub mod wellness;

pub use ai::{AiError, AiHandle, TextGenerator};
pub use chat::{ChatMessage, ChatSession};
pub use config::Config;
pub use wellness::{compute_metrics, Metrics, PlannerForm, PlannerSession, Profile};

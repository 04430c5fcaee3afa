//! Text, JSON and image generation behind one small trait.

mod gemini;
pub mod prompts;
pub mod schema;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AiError;

pub use gemini::{
    AiConfig, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient,
};

/// A model that can answer prompts.
///
/// `GeminiClient` is the production implementation; tests script their own.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Free-form text answer.
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    /// JSON answer constrained by `schema`. Returns the raw JSON text.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError>;

    /// Base64-encoded PNG for the prompt.
    async fn generate_image(&self, prompt: &str) -> Result<String, AiError>;
}

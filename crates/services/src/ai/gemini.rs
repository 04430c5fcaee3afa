use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use study_core::model::AppSettings;

use super::GenerativeModel;
use crate::error::AiError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const IMAGE_ASPECT_RATIO: &str = "16:9";

#[derive(Clone, Debug, PartialEq)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub image_model: String,
    pub temperature: f32,
}

impl AiConfig {
    /// Persisted settings win; the environment fills the gaps.
    ///
    /// Returns `None` when no API key is available.
    #[must_use]
    pub fn resolve(settings: &AppSettings) -> Option<Self> {
        Self::resolve_with(settings, |name| env::var(name).ok())
    }

    fn resolve_with(
        settings: &AppSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let pick = |stored: Option<&str>, name: &str| stored.map(str::to_owned).or_else(|| var(name));

        let api_key = pick(settings.api_key(), "STUDY_AI_API_KEY")?;
        Some(Self {
            base_url: pick(settings.api_base_url(), "STUDY_AI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            api_key,
            model: pick(settings.api_model(), "STUDY_AI_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.into()),
            image_model: pick(settings.image_model(), "STUDY_AI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into()),
            temperature: settings.effective_temperature(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Gemini `generateContent` over HTTPS.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<AiConfig>,
}

impl GeminiClient {
    #[must_use]
    pub fn new(config: Option<AiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn config(&self) -> Option<&AiConfig> {
        self.config.as_ref()
    }

    fn text_config<'a>(config: &AiConfig, schema: Option<&'a Value>) -> GenerationConfig<'a> {
        GenerationConfig {
            temperature: Some(config.temperature),
            top_p: Some(1.0),
            top_k: Some(1),
            response_mime_type: schema.map(|_| "application/json"),
            response_schema: schema,
            image_config: None,
        }
    }

    async fn send(
        &self,
        config: &AiConfig,
        model: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, AiError> {
        debug!(model, "sending generateContent request");
        let response = self
            .client
            .post(config.endpoint(model))
            .header("x-goog-api-key", &config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(model, status = %response.status(), "generateContent failed");
            return Err(AiError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, AiError> {
        let config = self.config.as_ref().ok_or(AiError::Disabled)?;
        let request = GenerateRequest::single(prompt, Some(Self::text_config(config, schema)));
        self.send(config, &config.model, &request)
            .await?
            .text()
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        self.generate(prompt, None).await
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        self.generate(prompt, Some(schema)).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, AiError> {
        let config = self.config.as_ref().ok_or(AiError::Disabled)?;
        let request = GenerateRequest::single(
            prompt,
            Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: IMAGE_ASPECT_RATIO,
                }),
                ..GenerationConfig::default()
            }),
        );
        self.send(config, &config.image_model, &request)
            .await?
            .first_image()
            .ok_or(AiError::NoImage)
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

impl<'a> GenerateRequest<'a> {
    fn single(prompt: &'a str, generation_config: Option<GenerationConfig<'a>>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }

    fn first_image(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
            .map(|d| d.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use study_core::model::AppSettingsDraft;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_key_disables_client() {
        assert!(AiConfig::resolve_with(&AppSettings::default(), no_env).is_none());
        let blank = |name: &str| (name == "STUDY_AI_API_KEY").then(|| "  ".to_owned());
        assert!(AiConfig::resolve_with(&AppSettings::default(), blank).is_none());
    }

    #[test]
    fn env_fills_defaults() {
        let env = |name: &str| (name == "STUDY_AI_API_KEY").then(|| "env-key".to_owned());
        let config = AiConfig::resolve_with(&AppSettings::default(), env).unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn settings_override_env() {
        let settings = AppSettingsDraft {
            api_key: Some("stored".into()),
            api_model: Some("gemini-custom".into()),
            api_base_url: Some("http://localhost:8080/v1beta/".into()),
            temperature: Some(0.1),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let env = |_: &str| Some("from-env".to_owned());
        let config = AiConfig::resolve_with(&settings, env).unwrap();
        assert_eq!(config.api_key, "stored");
        assert_eq!(config.model, "gemini-custom");
        assert_eq!(config.image_model, "from-env");
        assert_eq!(
            config.endpoint(&config.model),
            "http://localhost:8080/v1beta/models/gemini-custom:generateContent"
        );
    }

    #[test]
    fn json_request_carries_schema_and_sampling() {
        let config = AiConfig::resolve_with(&AppSettings::default(), |_| Some("k".into())).unwrap();
        let schema = json!({ "type": "ARRAY" });
        let request =
            GenerateRequest::single("hi", Some(GeminiClient::text_config(&config, Some(&schema))));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        let generation = &body["generationConfig"];
        assert_eq!(generation["topP"], 1.0);
        assert_eq!(generation["topK"], 1);
        assert_eq!(generation["responseMimeType"], "application/json");
        assert_eq!(generation["responseSchema"]["type"], "ARRAY");
        assert!(generation.get("imageConfig").is_none());
    }

    #[test]
    fn image_request_only_sets_aspect_ratio() {
        let request = GenerateRequest::single(
            "diagram",
            Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: IMAGE_ASPECT_RATIO,
                }),
                ..GenerationConfig::default()
            }),
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["generationConfig"],
            json!({ "imageConfig": { "aspectRatio": "16:9" } })
        );
    }

    #[test]
    fn response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": " [1," }, { "text": "2] \n" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn response_image_skips_text_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here you go" },
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
            ] } }]
        }))
        .unwrap();
        assert_eq!(response.first_image().as_deref(), Some("iVBORw0KGgo="));
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.text().is_none());
        assert!(response.first_image().is_none());
    }
}

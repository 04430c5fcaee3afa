use thiserror::Error;
use url::Url;

use crate::model::QuestionCount;

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppSettings {
    api_key: Option<String>,
    api_model: Option<String>,
    image_model: Option<String>,
    api_base_url: Option<String>,
    temperature: Option<f32>,
    default_question_count: Option<QuestionCount>,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub api_key: Option<String>,
    pub api_model: Option<String>,
    pub image_model: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f32>,
    pub default_question_count: Option<u32>,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),
    #[error(transparent)]
    InvalidQuestionCount(#[from] crate::model::QuestionCountError),
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing settings so a partial update keeps other fields.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            api_model: settings.api_model.clone(),
            image_model: settings.image_model.clone(),
            api_base_url: settings.api_base_url.clone(),
            temperature: settings.temperature,
            default_question_count: settings.default_question_count.map(QuestionCount::get),
        }
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid, the
    /// temperature is out of range, or the question count is out of range.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let api_model = normalize_optional(self.api_model);
        let image_model = normalize_optional(self.image_model);
        let api_base_url = normalize_optional(self.api_base_url);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(AppSettingsError::InvalidBaseUrl);
            }
        }

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(AppSettingsError::InvalidTemperature(t));
            }
        }

        let default_question_count = self
            .default_question_count
            .map(QuestionCount::new)
            .transpose()?;

        Ok(AppSettings {
            api_key,
            api_model,
            image_model,
            api_base_url,
            temperature: self.temperature,
            default_question_count,
        })
    }
}

impl AppSettings {
    /// # Errors
    ///
    /// Returns `AppSettingsError` if persisted values no longer validate.
    pub fn from_persisted(draft: AppSettingsDraft) -> Result<Self, AppSettingsError> {
        draft.validate()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn api_model(&self) -> Option<&str> {
        self.api_model.as_deref()
    }

    #[must_use]
    pub fn image_model(&self) -> Option<&str> {
        self.image_model.as_deref()
    }

    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    #[must_use]
    pub fn effective_temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    #[must_use]
    pub fn default_question_count(&self) -> QuestionCount {
        self.default_question_count.unwrap_or_default()
    }

    #[must_use]
    pub fn stored_question_count(&self) -> Option<QuestionCount> {
        self.default_question_count
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_become_none() {
        let settings = AppSettingsDraft {
            api_key: Some("   ".into()),
            api_model: Some(" gemini-x ".into()),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.api_model(), Some("gemini-x"));
    }

    #[test]
    fn rejects_bad_url_and_temperature() {
        let err = AppSettingsDraft {
            api_base_url: Some("not a url".into()),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AppSettingsError::InvalidBaseUrl);

        let err = AppSettingsDraft {
            temperature: Some(3.5),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AppSettingsError::InvalidTemperature(3.5));
    }

    #[test]
    fn defaults_fill_in() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_question_count().get(), 20);
        assert!((settings.effective_temperature() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn draft_round_trips_existing_settings() {
        let settings = AppSettingsDraft {
            api_key: Some("k".into()),
            default_question_count: Some(50),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let again = AppSettingsDraft::from_settings(&settings).validate().unwrap();
        assert_eq!(settings, again);
    }
}

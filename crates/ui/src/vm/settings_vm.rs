use services::ai::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use study_core::model::AppSettings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingRowVm {
    pub name: &'static str,
    pub value: String,
}

/// Keeps the last four characters of a key visible.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_owned();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value.map_or_else(|| format!("{default} (default)"), str::to_owned)
}

#[must_use]
pub fn map_settings(settings: &AppSettings) -> Vec<SettingRowVm> {
    vec![
        SettingRowVm {
            name: "API key",
            value: settings
                .api_key()
                .map_or_else(|| "not set (falls back to STUDY_AI_API_KEY)".to_owned(), mask_secret),
        },
        SettingRowVm {
            name: "Model",
            value: or_default(settings.api_model(), DEFAULT_TEXT_MODEL),
        },
        SettingRowVm {
            name: "Image model",
            value: or_default(settings.image_model(), DEFAULT_IMAGE_MODEL),
        },
        SettingRowVm {
            name: "Base URL",
            value: or_default(settings.api_base_url(), DEFAULT_BASE_URL),
        },
        SettingRowVm {
            name: "Temperature",
            value: settings.temperature().map_or_else(
                || format!("{} (default)", settings.effective_temperature()),
                |t| t.to_string(),
            ),
        },
        SettingRowVm {
            name: "Questions per quiz",
            value: settings.stored_question_count().map_or_else(
                || format!("{} (default)", settings.default_question_count()),
                |c| c.to_string(),
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::AppSettingsDraft;

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("sk-123456789"), "****6789");
    }

    #[test]
    fn defaults_are_labelled() {
        let rows = map_settings(&AppSettings::default());
        assert_eq!(rows[1].value, "gemini-3-flash-preview (default)");
        assert_eq!(rows[4].value, "0.7 (default)");
        assert_eq!(rows[5].value, "20 (default)");
    }

    #[test]
    fn stored_values_are_shown() {
        let settings = AppSettingsDraft {
            api_key: Some("secret-key-1234".into()),
            default_question_count: Some(50),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let rows = map_settings(&settings);
        assert_eq!(rows[0].value, "****1234");
        assert_eq!(rows[5].value, "50");
    }
}

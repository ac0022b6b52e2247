pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::Settings;

use crate::error::{AppError, AppResult};

pub const API_KEY_ENV: &str = "SENDLAYER_API_KEY";

pub fn resolve_profile(requested: &str) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return "default".to_string();
    }

    trimmed.to_string()
}

pub fn load_settings(paths: &AppPaths, profile: &str) -> AppResult<Settings> {
    settings::load(&paths.settings_file(profile))
}

pub fn save_settings(paths: &AppPaths, profile: &str, settings: &Settings) -> AppResult<()> {
    settings::save(&paths.settings_file(profile), settings)
}

/// Picks the API key: explicit flag or environment first, then the profile.
pub fn resolve_api_key(explicit: Option<&str>, settings: &Settings) -> AppResult<String> {
    explicit
        .or(settings.api_key.as_deref())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AppError::Config(format!(
                "missing api key. pass --api-key, set {API_KEY_ENV}, or run `sendlayer config set-key`"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_falls_back_to_default() {
        assert_eq!(resolve_profile("  "), "default");
        assert_eq!(resolve_profile(" work "), "work");
    }

    #[test]
    fn explicit_key_wins_over_profile() {
        let settings = Settings {
            api_key: Some("from-profile".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            resolve_api_key(Some("from-flag"), &settings).expect("key"),
            "from-flag"
        );
        assert_eq!(resolve_api_key(None, &settings).expect("key"), "from-profile");
    }

    #[test]
    fn profiles_are_stored_separately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths::at(dir.path().to_path_buf()).expect("paths");
        let work = Settings {
            api_key: Some("work-key".to_string()),
            ..Settings::default()
        };

        save_settings(&paths, "work", &work).expect("save");

        assert!(dir.path().join("profiles").join("work.json").is_file());
        let loaded = load_settings(&paths, "work").expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("work-key"));
        assert!(load_settings(&paths, "default").expect("load").api_key.is_none());
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let error = resolve_api_key(Some("  "), &Settings::default()).expect_err("missing");
        assert!(matches!(error, AppError::Config(_)));
    }
}

use serde::Serialize;

use crate::cli::ConfigCommand;
use crate::config;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct ProfileView {
    profile: String,
    settings_file: String,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    attachment_timeout_ms: Option<u64>,
}

pub fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::SetKey(args) => {
            let key = args.key.trim();
            if key.is_empty() {
                return Err(AppError::InvalidInput("api key must not be empty".to_string()));
            }

            let mut settings = ctx.settings.clone();
            settings.api_key = Some(key.to_string());
            config::save_settings(&ctx.paths, &ctx.profile, &settings)?;

            let text = format!("saved api key for profile {}", ctx.profile);
            ctx.output.emit(&text, &serde_json::json!({ "profile": ctx.profile }))
        }
        ConfigCommand::Show => {
            let settings = &ctx.settings;
            let view = ProfileView {
                profile: ctx.profile.clone(),
                settings_file: ctx.paths.settings_file(&ctx.profile).display().to_string(),
                api_key: settings.api_key.as_deref().map(mask_key),
                base_url: settings.base_url.clone(),
                timeout_secs: settings.timeout_secs,
                attachment_timeout_ms: settings.attachment_timeout_ms,
            };

            let lines = vec![
                format!("profile: {}", view.profile),
                format!("settings: {}", view.settings_file),
                format!("api key: {}", view.api_key.as_deref().unwrap_or("(not set)")),
                format!(
                    "base url: {}",
                    view.base_url.as_deref().unwrap_or("(default)")
                ),
            ];
            ctx.output.emit_lines(&lines, &view)
        }
    }
}

fn mask_key(key: &str) -> String {
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{visible}")
}

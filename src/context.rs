use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::sdk::SendLayer;

pub struct AppContext {
    pub profile: String,
    pub paths: AppPaths,
    pub settings: Settings,
    pub output: Output,
    api_key: Option<String>,
}

impl AppContext {
    pub fn bootstrap(profile: String, api_key: Option<String>, json: bool) -> AppResult<Self> {
        let profile = config::resolve_profile(&profile);
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &profile)?;
        let output = Output::new(json);

        Ok(Self {
            profile,
            paths,
            settings,
            output,
            api_key,
        })
    }

    pub fn client(&self) -> AppResult<SendLayer> {
        let api_key = config::resolve_api_key(self.api_key.as_deref(), &self.settings)?;
        let client_config = self.settings.client_config(api_key);
        tracing::debug!(profile = %self.profile, config = ?client_config, "building sendlayer client");
        Ok(SendLayer::with_config(client_config)?)
    }
}

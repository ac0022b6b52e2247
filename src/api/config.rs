use std::time::Duration;

use crate::error::{SdkError, SdkResult};

pub const DEFAULT_BASE_URL: &str = "https://console.sendlayer.com/api/v1/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ATTACHMENT_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub attachment_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            attachment_timeout: DEFAULT_ATTACHMENT_TIMEOUT,
            user_agent: format!("sendlayer-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_attachment_timeout(mut self, timeout: Duration) -> Self {
        self.attachment_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn validate(&self) -> SdkResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::validation("api key must not be empty"));
        }
        Ok(())
    }
}

// Keeps the key out of logs and panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("attachment_timeout", &self.attachment_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

use std::sync::Arc;

use crate::api::{ApiClient, ClientConfig, Emails, Events, HttpClient, ReqwestClient, Webhooks};
use crate::error::SdkResult;

#[derive(Debug)]
pub struct SendLayer<C = ReqwestClient> {
    pub emails: Emails<C>,
    pub events: Events<C>,
    pub webhooks: Webhooks<C>,
    client: Arc<ApiClient<C>>,
}

impl SendLayer<ReqwestClient> {
    pub fn new(api_key: impl Into<String>) -> SdkResult<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> SdkResult<Self> {
        Self::with_http_client(config, ReqwestClient::new())
    }
}

impl<C: HttpClient> SendLayer<C> {
    pub fn with_http_client(config: ClientConfig, http: C) -> SdkResult<Self> {
        let client = Arc::new(ApiClient::with_http_client(config, http)?);

        Ok(Self {
            emails: Emails::new(Arc::clone(&client)),
            events: Events::new(Arc::clone(&client)),
            webhooks: Webhooks::new(Arc::clone(&client)),
            client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }
}

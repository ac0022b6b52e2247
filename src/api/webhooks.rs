use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SdkError, SdkResult};

use super::client::ApiClient;
use super::http::{HttpClient, ReqwestClient};
use super::models::WebhookEvent;
use super::validate;

const WEBHOOKS_ENDPOINT: &str = "webhooks";

#[derive(Debug)]
pub struct Webhooks<C = ReqwestClient> {
    client: Arc<ApiClient<C>>,
}

#[derive(Debug, Serialize)]
struct CreateWebhookRequest<'a> {
    #[serde(rename = "WebhookURL")]
    webhook_url: &'a str,
    #[serde(rename = "Event")]
    event: &'static str,
}

impl<C: HttpClient> Webhooks<C> {
    pub fn new(client: Arc<ApiClient<C>>) -> Self {
        Self { client }
    }

    pub async fn create(&self, url: &str, event: impl AsRef<str>) -> SdkResult<Value> {
        if validate::parse_absolute_url(url).is_none() {
            return Err(SdkError::validation(format!("Invalid webhook URL - {url}")));
        }
        let event: WebhookEvent = event.as_ref().parse()?;

        let body = CreateWebhookRequest {
            webhook_url: url,
            event: event.as_str(),
        };
        self.client.post(WEBHOOKS_ENDPOINT, &body).await
    }

    pub async fn list(&self) -> SdkResult<Value> {
        self.client.get(WEBHOOKS_ENDPOINT, &[]).await
    }

    pub async fn get(&self) -> SdkResult<Value> {
        self.list().await
    }

    pub async fn delete(&self, webhook_id: i64) -> SdkResult<Value> {
        if webhook_id <= 0 {
            return Err(SdkError::validation("WebhookID must be greater than 0"));
        }

        let endpoint = webhook_endpoint(webhook_id);
        self.client.delete(&endpoint).await
    }
}

fn webhook_endpoint(id: i64) -> String {
    format!("{WEBHOOKS_ENDPOINT}/{id}")
}

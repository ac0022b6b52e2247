use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SdkError, SdkResult};

use super::attachments::{self, AttachmentPayload};
use super::client::ApiClient;
use super::http::{HttpClient, ReqwestClient};
use super::models::{EmailRequest, OneOrMany, Recipient, RecipientInput, SendResponse};
use super::validate;

const EMAIL_ENDPOINT: &str = "email";

#[derive(Debug)]
pub struct Emails<C = ReqwestClient> {
    client: Arc<ApiClient<C>>,
}

impl<C: HttpClient> Emails<C> {
    pub fn new(client: Arc<ApiClient<C>>) -> Self {
        Self { client }
    }

    pub async fn send(&self, request: EmailRequest) -> SdkResult<SendResponse> {
        let payload = build_payload(&self.client, request).await?;
        let response = self.client.post(EMAIL_ENDPOINT, &payload).await?;
        Ok(SendResponse::try_from(response)?)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
enum ContentType {
    #[serde(rename = "HTML")]
    Html,
    Text,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EmailPayload {
    from: Recipient,
    to: Vec<Recipient>,
    subject: String,
    content_type: ContentType,
    #[serde(rename = "HTMLContent", skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plain_content: Option<String>,
    #[serde(rename = "CC", skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<Recipient>>,
    #[serde(rename = "BCC", skip_serializing_if = "Option::is_none")]
    bcc: Option<Vec<Recipient>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Vec<Recipient>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

async fn build_payload<C: HttpClient>(
    client: &ApiClient<C>,
    request: EmailRequest,
) -> SdkResult<EmailPayload> {
    let EmailRequest {
        from,
        to,
        subject,
        text,
        html,
        cc,
        bcc,
        reply_to,
        attachments,
        headers,
        tags,
    } = request;

    let text = text.filter(|value| !value.is_empty());
    let html = html.filter(|value| !value.is_empty());
    if text.is_none() && html.is_none() {
        return Err(SdkError::validation(
            "Either 'text' or 'html' content must be provided.",
        ));
    }

    let from = normalize_recipient(from, "sender")?;
    let to = normalize_recipients(to, "recipient")?;
    let cc = cc.map(|group| normalize_recipients(group, "cc")).transpose()?;
    let bcc = bcc
        .map(|group| normalize_recipients(group, "bcc"))
        .transpose()?;
    let reply_to = reply_to
        .map(|group| normalize_recipients(group, "reply_to"))
        .transpose()?;

    let tags = tags.map(validate_tags).transpose()?;

    let attachments = match attachments {
        Some(inputs) => {
            inputs.iter().try_for_each(attachments::check)?;
            let mut resolved = Vec::with_capacity(inputs.len());
            for input in &inputs {
                resolved.push(attachments::resolve(client, input).await?);
            }
            Some(resolved)
        }
        None => None,
    };

    // HTML wins when both bodies are supplied; the plain text is dropped.
    let (content_type, html_content, plain_content) = match html {
        Some(html) => (ContentType::Html, Some(html), None),
        None => (ContentType::Text, None, text),
    };

    Ok(EmailPayload {
        from,
        to,
        subject,
        content_type,
        html_content,
        plain_content,
        cc,
        bcc,
        reply_to,
        attachments,
        headers,
        tags,
    })
}

fn normalize_recipient(input: RecipientInput, role: &str) -> SdkResult<Recipient> {
    let (email, name) = match input {
        RecipientInput::Address(email) => (Some(email), None),
        RecipientInput::Detailed { email, name } => (email, name),
    };

    match email {
        Some(email) if validate::is_valid_email(&email) => Ok(Recipient { email, name }),
        Some(email) => Err(SdkError::validation(format!(
            "Invalid {role} email address: {email}"
        ))),
        None => Err(SdkError::validation(format!(
            "Invalid {role} email address: missing"
        ))),
    }
}

fn normalize_recipients(
    group: OneOrMany<RecipientInput>,
    role: &str,
) -> SdkResult<Vec<Recipient>> {
    let inputs = group.into_vec();
    if inputs.is_empty() {
        return Err(SdkError::validation(format!(
            "At least one {role} email address is required"
        )));
    }

    inputs
        .into_iter()
        .map(|input| normalize_recipient(input, role))
        .collect()
}

fn validate_tags(tags: Value) -> SdkResult<Vec<String>> {
    let invalid = || SdkError::validation("Tags must be a list of strings.");

    let Value::Array(items) = tags else {
        return Err(invalid());
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag),
            _ => Err(invalid()),
        })
        .collect()
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SdkError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipientInput {
    Address(String),
    Detailed {
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<&str> for RecipientInput {
    fn from(value: &str) -> Self {
        Self::Address(value.to_string())
    }
}

impl From<String> for RecipientInput {
    fn from(value: String) -> Self {
        Self::Address(value)
    }
}

impl From<Recipient> for RecipientInput {
    fn from(value: Recipient) -> Self {
        Self::Detailed {
            email: Some(value.email),
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    // Tried first: a struct variant would otherwise accept a JSON array.
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

pub trait IntoRecipients {
    fn into_recipients(self) -> OneOrMany<RecipientInput>;
}

impl IntoRecipients for &str {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::One(self.into())
    }
}

impl IntoRecipients for String {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::One(self.into())
    }
}

impl IntoRecipients for Recipient {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::One(self.into())
    }
}

impl IntoRecipients for RecipientInput {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::One(self)
    }
}

impl IntoRecipients for OneOrMany<RecipientInput> {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        self
    }
}

impl<T: Into<RecipientInput>> IntoRecipients for Vec<T> {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::Many(self.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RecipientInput>, const N: usize> IntoRecipients for [T; N] {
    fn into_recipients(self) -> OneOrMany<RecipientInput> {
        OneOrMany::Many(self.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttachmentInput {
    pub path: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl AttachmentInput {
    pub fn new(path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub from: RecipientInput,
    pub to: OneOrMany<RecipientInput>,
    pub subject: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub cc: Option<OneOrMany<RecipientInput>>,
    #[serde(default)]
    pub bcc: Option<OneOrMany<RecipientInput>>,
    #[serde(default)]
    pub reply_to: Option<OneOrMany<RecipientInput>>,
    #[serde(default)]
    pub attachments: Option<Vec<AttachmentInput>>,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// Must be a JSON array of strings when present.
    #[serde(default)]
    pub tags: Option<Value>,
}

impl EmailRequest {
    pub fn new(
        from: impl Into<RecipientInput>,
        to: impl IntoRecipients,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into_recipients(),
            subject: subject.into(),
            text: None,
            html: None,
            cc: None,
            bcc: None,
            reply_to: None,
            attachments: None,
            headers: None,
            tags: None,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    #[must_use]
    pub fn cc(mut self, cc: impl IntoRecipients) -> Self {
        self.cc = Some(cc.into_recipients());
        self
    }

    #[must_use]
    pub fn bcc(mut self, bcc: impl IntoRecipients) -> Self {
        self.bcc = Some(bcc.into_recipients());
        self
    }

    #[must_use]
    pub fn reply_to(mut self, reply_to: impl IntoRecipients) -> Self {
        self.reply_to = Some(reply_to.into_recipients());
        self
    }

    #[must_use]
    pub fn attachment(mut self, attachment: AttachmentInput) -> Self {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| Value::String(tag.into()))
            .collect();
        self.tags = Some(Value::Array(tags));
        self
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendResponse {
    pub fields: Map<String, Value>,
}

impl SendResponse {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// `MessageID` when the provider returned it as a string.
    pub fn message_id(&self) -> Option<&str> {
        self.get("MessageID").and_then(Value::as_str)
    }
}

impl TryFrom<Value> for SendResponse {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            other => serde_json::from_value(other),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EventKind {
    Accepted,
    Rejected,
    Delivered,
    Opened,
    Clicked,
    Unsubscribed,
    Complained,
    Failed,
}

impl EventKind {
    pub const ALL: [Self; 8] = [
        Self::Accepted,
        Self::Rejected,
        Self::Delivered,
        Self::Opened,
        Self::Clicked,
        Self::Unsubscribed,
        Self::Complained,
        Self::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Delivered => "delivered",
            Self::Opened => "opened",
            Self::Clicked => "clicked",
            Self::Unsubscribed => "unsubscribed",
            Self::Complained => "complained",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for EventKind {
    type Err = SdkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                SdkError::validation(format!(
                    "Invalid event name - '{value}' is not a valid event name"
                ))
            })
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EventFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub event: Option<String>,
    pub message_id: Option<String>,
    pub start_from: Option<u64>,
    pub retrieve_count: Option<u32>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    #[must_use]
    pub fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    #[must_use]
    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    #[must_use]
    pub fn start_from(mut self, offset: u64) -> Self {
        self.start_from = Some(offset);
        self
    }

    #[must_use]
    pub fn retrieve_count(mut self, count: u32) -> Self {
        self.retrieve_count = Some(count);
        self
    }
}

impl From<EventKind> for String {
    fn from(value: EventKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub total_records: u64,
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum WebhookEvent {
    Bounce,
    Click,
    Open,
    Unsubscribe,
    Complaint,
    Delivery,
}

impl WebhookEvent {
    pub const ALL: [Self; 6] = [
        Self::Bounce,
        Self::Click,
        Self::Open,
        Self::Unsubscribe,
        Self::Complaint,
        Self::Delivery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Click => "click",
            Self::Open => "open",
            Self::Unsubscribe => "unsubscribe",
            Self::Complaint => "complaint",
            Self::Delivery => "delivery",
        }
    }
}

impl FromStr for WebhookEvent {
    type Err = SdkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == value)
            .ok_or_else(|| {
                let supported = Self::ALL.map(Self::as_str).join(", ");
                SdkError::validation(format!(
                    "'{value}' is not a valid event name. Supported events include {supported}"
                ))
            })
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for WebhookEvent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

pub mod attachments;
pub mod client;
pub mod config;
pub mod emails;
pub mod events;
pub mod http;
pub mod models;
pub mod validate;
pub mod webhooks;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use emails::Emails;
pub use events::Events;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};
pub use models::{
    AttachmentInput, EmailRequest, EventFilter, EventKind, EventsResponse, IntoRecipients,
    OneOrMany, Recipient, RecipientInput, SendResponse, WebhookEvent,
};
pub use webhooks::Webhooks;

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod mail;
pub mod output;
pub mod sdk;

pub use api::{
    AttachmentInput, ClientConfig, EmailRequest, Emails, EventFilter, EventKind, Events,
    EventsResponse, HttpClient, Recipient, RecipientInput, ReqwestClient, SendResponse,
    WebhookEvent, Webhooks,
};
pub use error::{ApiError, ErrorKind, SdkError, SdkResult};
pub use sdk::SendLayer;

use cli::Cli;
use error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    app::run(cli).await
}

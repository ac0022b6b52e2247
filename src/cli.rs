use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::API_KEY_ENV;

#[derive(Debug, Parser)]
#[command(name = "sendlayer", version, about = "SendLayer email API command line interface")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true, help = "API key")]
    pub api_key: Option<String>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Send(SendArgs),
    Events(EventsArgs),
    Webhooks(WebhooksArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    #[arg(long, help = "Sender address, optionally as `Name <addr>`")]
    pub from: Option<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "Recipient addresses")]
    pub to: Vec<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "CC addresses")]
    pub cc: Vec<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "BCC addresses")]
    pub bcc: Vec<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "Reply-To addresses")]
    pub reply_to: Vec<String>,
    #[arg(long, visible_alias = "subj", help = "Email subject")]
    pub subject: Option<String>,
    #[arg(long, help = "Inline plain text body")]
    pub text: Option<String>,
    #[arg(long, help = "Read plain text body from file")]
    pub text_file: Option<PathBuf>,
    #[arg(long, help = "Inline HTML body")]
    pub html: Option<String>,
    #[arg(long, help = "Read HTML body from file")]
    pub html_file: Option<PathBuf>,
    #[arg(long, help = "Render a Markdown file as the HTML body")]
    pub markdown_file: Option<PathBuf>,
    #[arg(long, action = ArgAction::Append, help = "Attach PATH[:MIME] (repeatable)")]
    pub attach: Vec<String>,
    #[arg(long, action = ArgAction::Append, help = "Custom header KEY=VALUE (repeatable)")]
    pub header: Vec<String>,
    #[arg(long, action = ArgAction::Append, help = "Tag (repeatable)")]
    pub tag: Vec<String>,
    #[arg(
        long,
        conflicts_with_all = ["from", "to", "subject"],
        help = "Send a JSON email draft"
    )]
    pub draft: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[arg(long, value_parser = parse_timestamp, help = "Start date (RFC 3339)")]
    pub start: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_timestamp, help = "End date (RFC 3339)")]
    pub end: Option<DateTime<Utc>>,
    #[arg(long, help = "Event type filter")]
    pub event: Option<String>,
    #[arg(long, help = "Message id filter")]
    pub message_id: Option<String>,
    #[arg(long, help = "Offset of the first record")]
    pub start_from: Option<u64>,
    #[arg(long, help = "Number of records to retrieve (1-100)")]
    pub count: Option<u32>,
}

#[derive(Debug, Args)]
pub struct WebhooksArgs {
    #[command(subcommand)]
    pub command: WebhookCommand,
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    Ls,
    Create(WebhookCreateArgs),
    Rm(WebhookRemoveArgs),
}

#[derive(Debug, Args)]
pub struct WebhookCreateArgs {
    #[arg(long, help = "Callback URL")]
    pub url: String,
    #[arg(long, help = "Event to subscribe to")]
    pub event: String,
}

#[derive(Debug, Args)]
pub struct WebhookRemoveArgs {
    #[arg(allow_negative_numbers = true, help = "Webhook id")]
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    SetKey(SetKeyArgs),
    Show,
}

#[derive(Debug, Args)]
pub struct SetKeyArgs {
    #[arg(help = "API key to store in the profile")]
    pub key: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}

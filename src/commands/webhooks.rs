use serde_json::Value;

use crate::cli::WebhookCommand;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext, command: WebhookCommand) -> AppResult<()> {
    let client = ctx.client()?;

    match command {
        WebhookCommand::Ls => {
            let response = client.webhooks.list().await?;
            ctx.output.emit(&compact(&response), &response)
        }
        WebhookCommand::Create(args) => {
            let response = client.webhooks.create(&args.url, &args.event).await?;
            let text = format!("created {} webhook for {}", args.event, args.url);
            ctx.output.emit_lines(&[text, compact(&response)], &response)
        }
        WebhookCommand::Rm(args) => {
            let response = client.webhooks.delete(args.id).await?;
            let text = format!("deleted webhook {}", args.id);
            ctx.output.emit(&text, &response)
        }
    }
}

fn compact(value: &Value) -> String {
    value.to_string()
}

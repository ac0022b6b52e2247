use std::fs;
use std::path::Path;

use crate::api::{AttachmentInput, EmailRequest, Recipient, RecipientInput};
use crate::cli::SendArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::mail::markdown;

pub async fn run(ctx: &AppContext, args: SendArgs) -> AppResult<()> {
    let request = build_request(args)?;
    let client = ctx.client()?;
    let result = client.emails.send(request).await?;

    let id = result.message_id().unwrap_or("(no message id)");
    let text = format!("sent message {id}");
    ctx.output.emit(&text, &result)
}

fn build_request(args: SendArgs) -> AppResult<EmailRequest> {
    if let Some(path) = &args.draft {
        let raw = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    let from = args
        .from
        .as_deref()
        .map(parse_mailbox)
        .ok_or_else(|| AppError::InvalidInput("--from is required".to_string()))?;
    if args.to.is_empty() {
        return Err(AppError::InvalidInput("--to is required".to_string()));
    }
    let subject = args
        .subject
        .clone()
        .ok_or_else(|| AppError::InvalidInput("--subject is required".to_string()))?;

    let to = mailboxes(&args.to);
    let mut request = EmailRequest::new(from, to, subject);

    let (text, html) = read_bodies(&args)?;
    if let Some(text) = text {
        request = request.text(text);
    }
    if let Some(html) = html {
        request = request.html(html);
    }

    if !args.cc.is_empty() {
        request = request.cc(mailboxes(&args.cc));
    }
    if !args.bcc.is_empty() {
        request = request.bcc(mailboxes(&args.bcc));
    }
    if !args.reply_to.is_empty() {
        request = request.reply_to(mailboxes(&args.reply_to));
    }

    for raw in &args.attach {
        request = request.attachment(parse_attachment(raw));
    }
    for header in &args.header {
        let (name, value) = header.split_once('=').ok_or_else(|| {
            AppError::InvalidInput(format!("invalid header `{header}`; expected KEY=VALUE"))
        })?;
        request = request.header(name.trim(), value.trim());
    }
    if !args.tag.is_empty() {
        request = request.tags(args.tag.iter().cloned());
    }

    Ok(request)
}

fn read_bodies(args: &SendArgs) -> AppResult<(Option<String>, Option<String>)> {
    let text_sources = [args.text.is_some(), args.text_file.is_some()];
    let html_sources = [
        args.html.is_some(),
        args.html_file.is_some(),
        args.markdown_file.is_some(),
    ];
    let selected_text = text_sources.iter().filter(|set| **set).count();
    let selected_html = html_sources.iter().filter(|set| **set).count();

    if selected_text + selected_html == 0 {
        return Err(AppError::InvalidInput(
            "missing body; pass --text, --text-file, --html, --html-file, or --markdown-file"
                .to_string(),
        ));
    }
    if selected_text > 1 {
        return Err(AppError::InvalidInput(
            "pass only one of --text or --text-file".to_string(),
        ));
    }
    if selected_html > 1 {
        return Err(AppError::InvalidInput(
            "pass only one of --html, --html-file, or --markdown-file".to_string(),
        ));
    }

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(fs::read_to_string(path)?),
        (None, None) => None,
    };

    let html = if let Some(html) = &args.html {
        Some(html.clone())
    } else if let Some(path) = &args.html_file {
        Some(fs::read_to_string(path)?)
    } else if let Some(path) = &args.markdown_file {
        Some(markdown::markdown_to_html(&fs::read_to_string(path)?))
    } else {
        None
    };

    Ok((text, html))
}

fn mailboxes(values: &[String]) -> Vec<RecipientInput> {
    values.iter().map(|value| parse_mailbox(value)).collect()
}

/// Accepts `addr` or `Display Name <addr>`.
fn parse_mailbox(raw: &str) -> RecipientInput {
    let trimmed = raw.trim();
    if let Some((name, rest)) = trimmed.split_once('<') {
        if let Some(email) = rest.strip_suffix('>') {
            let name = name.trim().trim_matches('"').trim();
            let email = email.trim();
            let recipient = if name.is_empty() {
                Recipient::new(email)
            } else {
                Recipient::with_name(email, name)
            };
            return recipient.into();
        }
    }

    RecipientInput::from(trimmed)
}

/// `PATH[:MIME]`; without a MIME type it is guessed from the extension.
fn parse_attachment(raw: &str) -> AttachmentInput {
    if let Some((path, mime)) = raw.rsplit_once(':') {
        if looks_like_mime(mime) {
            return AttachmentInput::new(path, mime);
        }
    }

    let guessed = mime_guess::from_path(Path::new(raw))
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    AttachmentInput::new(raw, guessed)
}

fn looks_like_mime(candidate: &str) -> bool {
    match candidate.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty() && !subtype.is_empty() && !subtype.contains(['/', '\\'])
        }
        None => false,
    }
}

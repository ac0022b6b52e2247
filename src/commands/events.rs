use crate::api::EventFilter;
use crate::cli::EventsArgs;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext, args: EventsArgs) -> AppResult<()> {
    let filter = build_filter(args);
    let client = ctx.client()?;
    let response = client.events.get(&filter).await?;

    let mut lines = vec![format!(
        "{} of {} events",
        response.events.len(),
        response.total_records
    )];
    lines.extend(response.events.iter().map(ToString::to_string));
    ctx.output.emit_lines(&lines, &response)
}

fn build_filter(args: EventsArgs) -> EventFilter {
    EventFilter {
        start_date: args.start,
        end_date: args.end,
        event: args.event,
        message_id: args.message_id,
        start_from: args.start_from,
        retrieve_count: args.count,
    }
}

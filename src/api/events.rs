use std::sync::Arc;

use serde_json::Value;

use crate::error::{SdkError, SdkResult};

use super::client::ApiClient;
use super::http::{HttpClient, ReqwestClient};
use super::models::{EventFilter, EventKind, EventsResponse};

const EVENTS_ENDPOINT: &str = "events";
const MAX_RETRIEVE_COUNT: u32 = 100;

#[derive(Debug)]
pub struct Events<C = ReqwestClient> {
    client: Arc<ApiClient<C>>,
}

impl<C: HttpClient> Events<C> {
    pub fn new(client: Arc<ApiClient<C>>) -> Self {
        Self { client }
    }

    pub async fn get(&self, filter: &EventFilter) -> SdkResult<EventsResponse> {
        let query = build_query(filter)?;
        let response = self.client.get(EVENTS_ENDPOINT, &query).await?;
        Ok(reshape_response(&response))
    }
}

fn build_query(filter: &EventFilter) -> SdkResult<Vec<(&'static str, String)>> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if end <= start {
            return Err(SdkError::validation(
                "Invalid date range - End date must be after start date",
            ));
        }
    }

    // Empty strings mean "no filter", like an unset field.
    let event = filter
        .event
        .as_deref()
        .filter(|event| !event.is_empty())
        .map(str::parse::<EventKind>)
        .transpose()?;

    if let Some(count) = filter.retrieve_count {
        if count == 0 || count > MAX_RETRIEVE_COUNT {
            return Err(SdkError::validation(
                "Invalid retrieve count - must be between 1 and 100",
            ));
        }
    }

    let mut query = Vec::new();
    if let Some(start) = filter.start_date {
        query.push(("StartDate", start.timestamp().to_string()));
    }
    if let Some(end) = filter.end_date {
        query.push(("EndDate", end.timestamp().to_string()));
    }
    if let Some(event) = event {
        query.push(("Event", event.to_string()));
    }
    if let Some(message_id) = filter.message_id.as_deref().filter(|id| !id.is_empty()) {
        query.push(("MessageID", message_id.to_string()));
    }
    if let Some(start_from) = filter.start_from {
        query.push(("StartFrom", start_from.to_string()));
    }
    if let Some(count) = filter.retrieve_count {
        query.push(("RetrieveCount", count.to_string()));
    }

    Ok(query)
}

fn reshape_response(response: &Value) -> EventsResponse {
    EventsResponse {
        total_records: response
            .get("TotalRecords")
            .and_then(Value::as_u64)
            .unwrap_or_default(),
        events: response
            .get("Events")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn omits_unset_parameters() {
        let query = build_query(&EventFilter::new()).expect("empty filter");
        assert!(query.is_empty());
    }

    #[test]
    fn serializes_dates_as_unix_seconds() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let filter = EventFilter::new()
            .start_date(start)
            .end_date(start + Duration::seconds(1));

        let query = build_query(&filter).expect("valid range");
        assert_eq!(
            query,
            vec![
                ("StartDate", "1735689600".to_string()),
                ("EndDate", "1735689601".to_string()),
            ]
        );
    }

    #[test]
    fn empty_event_and_message_id_are_omitted() {
        let filter = EventFilter::new().event("").message_id("");
        let query = build_query(&filter).expect("empty strings are unset");
        assert!(query.is_empty());
    }

    #[test]
    fn rejects_equal_dates() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let filter = EventFilter::new().start_date(start).end_date(start);
        assert!(build_query(&filter).is_err());
    }

    #[test]
    fn retrieve_count_bounds() {
        for count in [0, 101] {
            assert!(build_query(&EventFilter::new().retrieve_count(count)).is_err());
        }
        for count in [1, 100] {
            assert!(build_query(&EventFilter::new().retrieve_count(count)).is_ok());
        }
    }

    #[test]
    fn reshapes_missing_fields_to_defaults() {
        let reshaped = reshape_response(&serde_json::json!({}));
        assert_eq!(reshaped.total_records, 0);
        assert!(reshaped.events.is_empty());
    }

    #[test]
    fn renames_provider_fields() {
        let reshaped = reshape_response(&serde_json::json!({
            "TotalRecords": 2,
            "Events": [{ "Event": "opened" }, { "Event": "clicked" }]
        }));
        assert_eq!(reshaped.total_records, 2);
        assert_eq!(reshaped.events[1]["Event"], "clicked");

        let json = serde_json::to_value(&reshaped).expect("serialize");
        assert_eq!(json["totalRecords"], 2);
        assert!(json["events"].is_array());
    }
}

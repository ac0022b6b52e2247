#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use http::{HeaderMap, StatusCode};
use sendlayer::api::{HttpClient, HttpError, HttpRequest, HttpResponse};
use sendlayer::{ClientConfig, SendLayer};
use serde_json::Value;

pub const API_KEY: &str = "test-api-key";

enum Reply {
    Response(StatusCode, Vec<u8>),
    Timeout,
}

#[derive(Default)]
struct StubState {
    replies: VecDeque<Reply>,
    requests: Vec<HttpRequest>,
}

/// Records every request and replays queued replies in order.
/// With nothing queued it answers `200 {}`.
#[derive(Clone, Default)]
pub struct StubClient {
    state: Arc<Mutex<StubState>>,
}

impl fmt::Debug for StubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubClient")
            .field("requests", &self.request_count())
            .finish()
    }
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, status: u16, body: Value) -> &Self {
        self.reply_raw(status, body.to_string().into_bytes())
    }

    pub fn reply_raw(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.lock()
            .replies
            .push_back(Reply::Response(status, body.into()));
        self
    }

    pub fn reply_timeout(&self) -> &Self {
        self.lock().replies.push_back(Reply::Timeout);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.lock()
            .requests
            .last()
            .cloned()
            .expect("at least one request")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state lock")
    }
}

impl HttpClient for StubClient {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        let mut state = self.lock();
        state.requests.push(req);

        let result = match state.replies.pop_front() {
            Some(Reply::Response(status, body)) => {
                Ok(HttpResponse::new(status, HeaderMap::new(), body))
            }
            Some(Reply::Timeout) => Err(HttpError::Timeout),
            None => Ok(HttpResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                b"{}".to_vec(),
            )),
        };
        std::future::ready(result)
    }
}

pub fn sdk(stub: &StubClient) -> SendLayer<StubClient> {
    sdk_with_config(stub, ClientConfig::new(API_KEY))
}

pub fn sdk_with_config(stub: &StubClient, config: ClientConfig) -> SendLayer<StubClient> {
    SendLayer::with_http_client(config, stub.clone()).expect("sdk should build")
}

pub fn json_body(request: &HttpRequest) -> Value {
    let body = request.body.as_deref().expect("request body");
    serde_json::from_slice(body).expect("json request body")
}

pub fn query_map(request: &HttpRequest) -> HashMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

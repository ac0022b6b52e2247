use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{ApiError, SdkError, SdkResult};

use super::config::ClientConfig;
use super::http::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};

#[derive(Debug)]
pub struct ApiClient<C = ReqwestClient> {
    http: C,
    config: ClientConfig,
    base_url: Url,
    headers: HeaderMap,
}

impl ApiClient<ReqwestClient> {
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        Self::with_http_client(config, ReqwestClient::new())
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn with_http_client(config: ClientConfig, http: C) -> SdkResult<Self> {
        config.validate()?;
        let base_url = parse_base_url(&config.base_url)?;
        let headers = default_headers(&config)?;

        Ok(Self {
            http,
            config,
            base_url,
            headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> SdkResult<Value> {
        self.request::<()>(Method::GET, endpoint, query, None).await
    }

    pub async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> SdkResult<Value> {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> SdkResult<Value> {
        self.request::<()>(Method::DELETE, endpoint, &[], None).await
    }

    pub async fn request<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> SdkResult<Value> {
        let url = self.endpoint_url(endpoint, query)?;
        let mut request = HttpRequest::new(method.clone(), url).with_timeout(self.config.timeout);
        request.headers = self.headers.clone();

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|err| {
                SdkError::Other(format!("request body is not serializable: {err}"))
            })?;
            request = request.with_body(payload);
        }

        tracing::debug!(%method, endpoint, "sending api request");
        let response = self.http.request(request).await?;
        parse_json_response(&response)
    }

    pub(crate) async fn fetch(&self, url: Url) -> SdkResult<HttpResponse> {
        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|_| SdkError::validation("user agent contains invalid characters"))?;
        let request = HttpRequest::get(url)
            .with_header(USER_AGENT, user_agent)
            .with_timeout(self.config.attachment_timeout);

        Ok(self.http.request(request).await?)
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> SdkResult<Url> {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            return Err(SdkError::validation("endpoint must not be empty"));
        }

        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|err| SdkError::validation(format!("invalid endpoint `{endpoint}`: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> SdkResult<Url> {
    // `Url::join` drops the last segment unless the base ends with a slash.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized)
        .map_err(|err| SdkError::validation(format!("invalid base url `{raw}`: {err}")))
}

fn default_headers(config: &ClientConfig) -> SdkResult<HeaderMap> {
    let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
        .map_err(|_| SdkError::validation("api key contains invalid header characters"))?;
    let user_agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|_| SdkError::validation("user agent contains invalid characters"))?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, user_agent);
    Ok(headers)
}

fn parse_json_response(response: &HttpResponse) -> SdkResult<Value> {
    let status = response.status;
    if status.is_success() {
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }
        return Ok(serde_json::from_slice(&response.body)?);
    }

    tracing::warn!(status = status.as_u16(), "api request failed");
    Err(map_api_error(status, &response.body))
}

fn map_api_error(status: StatusCode, body: &[u8]) -> SdkError {
    let (message, body) = match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => {
            let message = error_field(&parsed).unwrap_or_else(|| default_message(status));
            (message, parsed)
        }
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or("Unknown error").to_string();
            let body = serde_json::json!({ "Error": reason });
            (reason, body)
        }
    };

    let api = ApiError {
        status,
        message,
        body,
    };

    match status.as_u16() {
        401 => SdkError::Authentication(api),
        400 | 422 => SdkError::Validation(api.message),
        404 => SdkError::NotFound(api),
        429 => SdkError::RateLimit(api),
        500 => SdkError::InternalServer(api),
        _ => SdkError::Api(api),
    }
}

fn error_field(body: &Value) -> Option<String> {
    match body.get("Error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn default_message(status: StatusCode) -> String {
    let message = match status.as_u16() {
        401 => "Invalid API key",
        400 => "Invalid request parameters",
        404 => "Resource not found",
        422 => "Unprocessable Entity",
        429 => "Rate limit exceeded",
        500 => "Internal server error",
        code if code >= 500 => "Server error",
        _ => "API request failed",
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn maps_rate_limit_with_error_field() {
        let error = map_api_error(StatusCode::TOO_MANY_REQUESTS, br#"{"Error":"slow down"}"#);

        assert_eq!(error.kind(), ErrorKind::RateLimit);
        assert_eq!(error.message(), "slow down");
    }

    #[test]
    fn maps_bad_request_and_unprocessable_as_validation() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY] {
            let error = map_api_error(status, br#"{"Error":"From is required"}"#);
            match error {
                SdkError::Validation(message) => assert_eq!(message, "From is required"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn falls_back_to_reason_phrase_for_non_json_body() {
        let error = map_api_error(StatusCode::SERVICE_UNAVAILABLE, b"<html>down</html>");

        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.message(), "Service Unavailable");
        assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn uses_status_default_when_error_field_missing() {
        let error = map_api_error(StatusCode::UNAUTHORIZED, br#"{"detail":"nope"}"#);

        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.message(), "Invalid API key");
        assert_eq!(
            error.raw_response().and_then(|body| body["detail"].as_str()),
            Some("nope")
        );
    }

    #[test]
    fn other_statuses_become_generic_api_errors() {
        let error = map_api_error(StatusCode::FORBIDDEN, br#"{"Error":"forbidden"}"#);
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status(), Some(StatusCode::FORBIDDEN));

        let error = map_api_error(StatusCode::BAD_GATEWAY, b"{}");
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.message(), "Server error");
    }

    #[test]
    fn maps_not_found_and_internal_server() {
        assert_eq!(
            map_api_error(StatusCode::NOT_FOUND, b"").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            map_api_error(StatusCode::INTERNAL_SERVER_ERROR, b"").kind(),
            ErrorKind::InternalServer
        );
    }

    #[test]
    fn empty_success_body_decodes_to_empty_object() {
        let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), Vec::new());
        let value = parse_json_response(&response).expect("empty body");
        assert_eq!(value, Value::Object(Map::new()));
    }

    #[test]
    fn invalid_success_body_is_decode_error() {
        let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), b"not json".to_vec());
        let error = parse_json_response(&response).expect_err("decode failure");
        assert_eq!(error.kind(), ErrorKind::Decode);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("https://api.example.test/v1").expect("base url");
        assert_eq!(
            url.join("email").expect("join").as_str(),
            "https://api.example.test/v1/email"
        );
    }
}

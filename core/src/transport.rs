//! Sending request descriptors over the network.
//!
//! The facades never touch the network themselves. They hand every
//! `HttpRequest` to a `Transport`; tests can substitute a transport that
//! records requests and returns canned responses.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{instrument, Span};

use crate::error::TransportError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Executes one HTTP round-trip.
///
/// Implementations return `Ok` for every response the server sends,
/// whatever its status; only failures to deliver the request are errors.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    disable_ssl_verification: bool,
}

impl ReqwestTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept any server certificate. Only for test environments.
    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(self.disable_ssl_verification);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(ReqwestTransport {
            client: builder.build()?,
        })
    }
}

impl Transport for ReqwestTransport {
    #[instrument(
        name = "http.send",
        skip_all,
        fields(method = request.method.as_str(), url = %request.url, status)
    )]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
            ..
        } = request;

        let mut builder = self
            .client
            .request(to_reqwest_method(method), &url)
            .headers(to_header_map(&headers)?);
        if !query.is_empty() {
            builder = builder.query(&encode_query(&query));
        }
        builder = match body {
            Some(RequestBody::Json(value)) => {
                builder.body(serde_json::to_vec(&value).map_err(TransportError::Body)?)
            }
            Some(RequestBody::Binary(bytes)) => builder.body(bytes),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        Span::current().record("status", status.as_u16());

        let response_headers = from_header_map(response.headers());
        let body: Bytes = response.bytes().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response_headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let invalid = |reason: String| TransportError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

// Non-UTF-8 header values are dropped.
fn from_header_map(map: &HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Render query values as strings. Arrays become comma-separated lists.
pub fn encode_query(query: &[(String, Value)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| (key.clone(), query_string(value)))
        .collect()
}

fn query_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(query_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_values_are_rendered_plainly() {
        let query = vec![
            ("id".to_string(), json!(["a", "b", "c"])),
            ("force".to_string(), json!(true)),
            ("limit".to_string(), json!(100)),
            ("entity.name".to_string(), json!("X Y")),
        ];
        assert_eq!(
            encode_query(&query),
            vec![
                ("id".to_string(), "a,b,c".to_string()),
                ("force".to_string(), "true".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("entity.name".to_string(), "X Y".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let headers: Headers = [("bad header", "x")].into_iter().collect();
        let err = to_header_map(&headers).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader { name, .. } if name == "bad header"));
    }

    #[test]
    fn header_map_round_trips_valid_headers() {
        let headers: Headers = [("Accept", "application/json"), ("X-Trace", "1")]
            .into_iter()
            .collect();
        let back = from_header_map(&to_header_map(&headers).unwrap());
        assert_eq!(back.get("accept"), Some("application/json"));
        assert_eq!(back.get("x-trace"), Some("1"));
    }

    #[test]
    fn builder_applies_options() {
        let transport = ReqwestTransport::builder()
            .timeout(Duration::from_secs(5))
            .disable_ssl_verification(true)
            .build();
        assert!(transport.is_ok());
    }
}

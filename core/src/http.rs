//! HTTP request and response descriptors.
//!
//! # Design
//! These types describe HTTP traffic as plain data. The service facades build
//! an `HttpRequest` for every call and hand it to a `Transport`, which owns
//! the actual I/O and returns an `HttpResponse`. Keeping the descriptors free
//! of any client library types makes request building deterministic and easy
//! to assert on in tests.
//!
//! All fields use owned types so a descriptor can be moved into a transport
//! future without lifetime concerns.

use bytes::Bytes;
use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Ordered list of header name/value pairs.
///
/// Names are compared case-insensitively: inserting `accept` replaces an
/// existing `Accept` entry in place, keeping its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `name` to `value`, replacing any entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(entry) => *entry = (name, value),
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert every entry of `other`, in order. Entries in `other` win.
    pub fn extend(&mut self, other: &Headers) {
        for (name, value) in &other.0 {
            self.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document, serialized by the transport.
    Json(Value),
    /// Raw bytes sent verbatim.
    Binary(Bytes),
}

/// An HTTP request described as plain data.
///
/// `query` keeps the wire key names in the order the operation declares them.
/// Values are left as JSON so that arrays reach the transport unencoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path template with every placeholder substituted.
    pub path: String,
    /// Service base URL followed by `path`, with each substituted path value
    /// percent-encoded. This is what goes on the wire.
    pub url: String,
    pub query: Vec<(String, Value)>,
    pub headers: Headers,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Look up a query value by its wire key.
    pub fn query_value(&self, key: &str) -> Option<&Value> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The outcome of a successful operation call.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub result: T,
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.insert("Accept", "application/json");
        headers.insert("X-Trace", "1");
        headers.insert("accept", "fake/accept");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("ACCEPT"), Some("fake/accept"));
        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["accept", "X-Trace"]);
    }

    #[test]
    fn extend_lets_other_win() {
        let mut base: Headers = [("Accept", "a"), ("Content-Type", "b")].into_iter().collect();
        let other: Headers = [("accept", "c")].into_iter().collect();
        base.extend(&other);
        assert_eq!(base.get("Accept"), Some("c"));
        assert_eq!(base.get("Content-Type"), Some("b"));
    }

    #[test]
    fn query_value_looks_up_wire_key() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "/v3/data_intg_flows".to_string(),
            url: "http://localhost/v3/data_intg_flows".to_string(),
            query: vec![("entity.name".to_string(), Value::from("X"))],
            headers: Headers::new(),
            body: None,
        };
        assert_eq!(req.query_value("entity.name"), Some(&Value::from("X")));
        assert!(req.query_value("entityName").is_none());
    }

    #[test]
    fn success_range() {
        let mut resp = HttpResponse {
            status: 204,
            status_text: "No Content".to_string(),
            headers: Headers::new(),
            body: Bytes::new(),
        };
        assert!(resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
    }
}

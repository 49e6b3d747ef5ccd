//! Request authentication.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::http::HttpRequest;

pub const AUTH_TYPE_NOAUTH: &str = "noauth";
pub const AUTH_TYPE_BEARER_TOKEN: &str = "bearertoken";
pub const AUTH_TYPE_BASIC: &str = "basic";

/// Credentials attached to every outgoing request.
///
/// Set once when a service is constructed and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub enum Authenticator {
    NoAuth,
    BearerToken(String),
    Basic { username: String, password: String },
}

impl Authenticator {
    pub fn auth_type(&self) -> &'static str {
        match self {
            Authenticator::NoAuth => AUTH_TYPE_NOAUTH,
            Authenticator::BearerToken(_) => AUTH_TYPE_BEARER_TOKEN,
            Authenticator::Basic { .. } => AUTH_TYPE_BASIC,
        }
    }

    /// Set the `Authorization` header, replacing any value already present.
    pub fn authenticate(&self, request: &mut HttpRequest) {
        match self {
            Authenticator::NoAuth => {}
            Authenticator::BearerToken(token) => {
                request.headers.insert("Authorization", format!("Bearer {token}"));
            }
            Authenticator::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                request.headers.insert("Authorization", format!("Basic {credentials}"));
            }
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::NoAuth => f.write_str("NoAuth"),
            Authenticator::BearerToken(_) => f.write_str("BearerToken(***)"),
            Authenticator::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Headers, HttpMethod};

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "/v3/data_intg_flows".to_string(),
            url: "http://localhost/v3/data_intg_flows".to_string(),
            query: Vec::new(),
            headers: Headers::new(),
            body: None,
        }
    }

    #[test]
    fn noauth_leaves_headers_alone() {
        let mut req = request();
        Authenticator::NoAuth.authenticate(&mut req);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn bearer_token_sets_authorization() {
        let mut req = request();
        req.headers.insert("authorization", "stale");
        Authenticator::BearerToken("tok".to_string()).authenticate(&mut req);
        assert_eq!(req.headers.get("Authorization"), Some("Bearer tok"));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn basic_encodes_credentials() {
        let mut req = request();
        Authenticator::Basic {
            username: "Aladdin".to_string(),
            password: "open sesame".to_string(),
        }
        .authenticate(&mut req);
        assert_eq!(
            req.headers.get("Authorization"),
            Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
        );
    }

    #[test]
    fn debug_hides_secrets() {
        let auth = Authenticator::BearerToken("secret".to_string());
        assert!(!format!("{auth:?}").contains("secret"));
    }
}

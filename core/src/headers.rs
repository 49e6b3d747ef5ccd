//! Header composition.
//!
//! Precedence, lowest to highest: service-wide default headers, the
//! operation's media defaults, SDK identification, caller overrides.

use crate::http::Headers;
use crate::operation::MediaDefaults;

const SDK_NAME: &str = "datastage-rust-sdk";

pub const USER_AGENT: &str = "User-Agent";
pub const SDK_ANALYTICS: &str = "X-IBMCloud-SDK-Analytics";

/// Headers identifying this SDK and the operation being called.
pub fn sdk_headers(service_name: &str, service_version: &str, operation_id: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert(USER_AGENT, user_agent());
    headers.insert(
        SDK_ANALYTICS,
        format!(
            "service_name={service_name};service_version={service_version};operation_id={operation_id}"
        ),
    );
    headers
}

fn user_agent() -> String {
    format!(
        "{SDK_NAME}/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Merge header layers. Later layers replace earlier ones key by key.
pub fn compose_headers(
    service_defaults: &Headers,
    media: MediaDefaults,
    sdk: &Headers,
    caller: &Headers,
) -> Headers {
    let mut merged = service_defaults.clone();
    if let Some(accept) = media.accept {
        merged.insert("Accept", accept);
    }
    if let Some(content_type) = media.content_type {
        merged.insert("Content-Type", content_type);
    }
    merged.extend(sdk);
    merged.extend(caller);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{JSON_MEDIA_TYPE, OCTET_STREAM_MEDIA_TYPE};

    #[test]
    fn sdk_headers_identify_operation() {
        let headers = sdk_headers("datastage", "v3", "listDatastageFlows");
        assert_eq!(
            headers.get(SDK_ANALYTICS),
            Some("service_name=datastage;service_version=v3;operation_id=listDatastageFlows")
        );
        assert!(headers
            .get(USER_AGENT)
            .is_some_and(|ua| ua.starts_with("datastage-rust-sdk/")));
    }

    #[test]
    fn media_defaults_apply() {
        let merged = compose_headers(
            &Headers::new(),
            MediaDefaults::BINARY_UPLOAD,
            &Headers::new(),
            &Headers::new(),
        );
        assert_eq!(merged.get("Accept"), Some(JSON_MEDIA_TYPE));
        assert_eq!(merged.get("Content-Type"), Some(OCTET_STREAM_MEDIA_TYPE));
    }

    #[test]
    fn no_media_defaults_leave_headers_unset() {
        let merged = compose_headers(
            &Headers::new(),
            MediaDefaults::NONE,
            &Headers::new(),
            &Headers::new(),
        );
        assert!(merged.get("Accept").is_none());
        assert!(merged.get("Content-Type").is_none());
    }

    #[test]
    fn caller_headers_win() {
        let caller: Headers = [("accept", "fake/accept"), ("Content-Type", "fake/contentType")]
            .into_iter()
            .collect();
        let merged = compose_headers(
            &Headers::new(),
            MediaDefaults::JSON_EXCHANGE,
            &sdk_headers("datastage", "v3", "createDatastageFlows"),
            &caller,
        );
        assert_eq!(merged.get("Accept"), Some("fake/accept"));
        assert_eq!(merged.get("Content-Type"), Some("fake/contentType"));
        assert!(merged.contains(SDK_ANALYTICS));
    }

    #[test]
    fn caller_can_override_sdk_identity() {
        let caller: Headers = [(USER_AGENT, "custom")].into_iter().collect();
        let merged = compose_headers(
            &Headers::new(),
            MediaDefaults::NONE,
            &sdk_headers("datastage", "v3", "deleteMigration"),
            &caller,
        );
        assert_eq!(merged.get(USER_AGENT), Some("custom"));
    }

    #[test]
    fn service_defaults_are_lowest() {
        let defaults: Headers = [("Accept", "text/plain"), ("X-Tenant", "t1")]
            .into_iter()
            .collect();
        let merged = compose_headers(
            &defaults,
            MediaDefaults::JSON_RESPONSE,
            &Headers::new(),
            &Headers::new(),
        );
        assert_eq!(merged.get("Accept"), Some(JSON_MEDIA_TYPE));
        assert_eq!(merged.get("X-Tenant"), Some("t1"));
    }
}

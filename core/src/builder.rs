//! Request building.
//!
//! `build_request` turns an `OperationSpec` and an already validated
//! `ParamsBag` into an `HttpRequest`. It performs no I/O and cannot fail:
//! parameters missing from the bag are simply left out of the request.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

use crate::headers::compose_headers;
use crate::http::{Headers, HttpRequest, RequestBody};
use crate::operation::{BodySpec, OperationSpec};
use crate::params::{ParamValue, ParamsBag};

/// Build the request descriptor for one call.
///
/// `base_url` must not end with `/`. `service_defaults` and `sdk` are the
/// facade's default headers and the SDK identification headers; the bag's
/// own headers are applied on top of both.
pub fn build_request(
    base_url: &str,
    spec: &OperationSpec,
    params: &ParamsBag,
    service_defaults: &Headers,
    sdk: &Headers,
) -> HttpRequest {
    let path = substitute_path(spec, params, |segment| segment.to_string());
    let url = format!(
        "{base_url}{}",
        substitute_path(spec, params, |segment| {
            utf8_percent_encode(segment, PATH_SEGMENT).to_string()
        })
    );

    let query = spec
        .query
        .iter()
        .filter_map(|binding| match params.get(binding.param) {
            Some(ParamValue::Json(value)) => Some((binding.wire.to_string(), value.clone())),
            _ => None,
        })
        .collect();

    let body = match spec.body {
        BodySpec::None => None,
        BodySpec::Json(fields) => {
            let mut object = Map::new();
            for binding in fields {
                if let Some(ParamValue::Json(value)) = params.get(binding.param) {
                    object.insert(binding.wire.to_string(), value.clone());
                }
            }
            Some(RequestBody::Json(Value::Object(object)))
        }
        BodySpec::Binary(name) => match params.get(name) {
            Some(ParamValue::Binary(bytes)) => Some(RequestBody::Binary(bytes.clone())),
            _ => None,
        },
    };

    let headers = compose_headers(service_defaults, spec.media, sdk, &params.headers);

    HttpRequest {
        method: spec.method,
        path,
        url,
        query,
        headers,
        body,
    }
}

/// Characters left alone when a path value is placed in the URL. Everything
/// else, `/ ? # %` included, is percent-encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn substitute_path(
    spec: &OperationSpec,
    params: &ParamsBag,
    render: impl Fn(&str) -> String,
) -> String {
    let mut path = spec.path.to_string();
    for binding in spec.path_params {
        let Some(ParamValue::Json(value)) = params.get(binding.param) else {
            continue;
        };
        let segment = match value {
            Value::String(s) => render(s),
            other => render(&other.to_string()),
        };
        path = path.replacen(&format!("{{{}}}", binding.wire), &segment, 1);
    }
    path
}

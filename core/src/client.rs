//! Surface-independent service client.
//!
//! # Design
//! Both API surfaces talk to the same backend with the same request shapes.
//! They differ only in service name, default URL and the operation ids they
//! report, so each is a `Surface` value and one `ServiceClient` drives either.
//! A call runs in fixed steps: validate required parameters, build the
//! request descriptor, authenticate it, send it through the `Transport`,
//! decode the response. Validation failures never reach the transport.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::builder::build_request;
use crate::config::ExternalConfig;
use crate::error::Error;
use crate::headers::sdk_headers;
use crate::http::{DetailedResponse, Headers, HttpRequest, HttpResponse};
use crate::operation::Operation;
use crate::params::{OperationParams, ParamsBag};
use crate::transport::{ReqwestTransport, Transport};
use crate::validate::missing_params;

/// One API surface of the service.
#[derive(Debug)]
pub struct Surface {
    pub service_name: &'static str,
    pub default_service_url: &'static str,
    pub service_version: &'static str,
    operations: &'static [(Operation, &'static str)],
}

impl Surface {
    /// The operation id reported in SDK headers, or `None` if the surface
    /// does not offer `operation`.
    pub fn operation_id(&self, operation: Operation) -> Option<&'static str> {
        self.operations
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, id)| *id)
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.operation_id(operation).is_some()
    }

    pub const fn new(
        service_name: &'static str,
        default_service_url: &'static str,
        service_version: &'static str,
        operations: &'static [(Operation, &'static str)],
    ) -> Self {
        Self {
            service_name,
            default_service_url,
            service_version,
            operations,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.iter().map(|(op, _)| *op)
    }
}

/// Construction options for `new_instance`.
///
/// Anything left unset is resolved from external configuration under
/// `service_name`, which itself defaults to the surface's name.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub service_name: Option<String>,
    pub service_url: Option<String>,
    pub authenticator: Option<Authenticator>,
    pub headers: Headers,
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Executes operations of one surface over a `Transport`.
#[derive(Debug)]
pub struct ServiceClient<T> {
    surface: &'static Surface,
    service_url: String,
    authenticator: Authenticator,
    default_headers: Headers,
    transport: T,
}

impl<T: Transport> ServiceClient<T> {
    /// `service_url` falls back to the surface's default URL.
    pub fn new(
        surface: &'static Surface,
        transport: T,
        authenticator: Authenticator,
        service_url: Option<&str>,
    ) -> Self {
        Self {
            surface,
            service_url: normalize_url(service_url.unwrap_or(surface.default_service_url)),
            authenticator,
            default_headers: Headers::new(),
            transport,
        }
    }

    /// Resolve unset options from `config`. An explicit URL wins over the
    /// configured one, which wins over the surface default.
    pub fn from_config(
        surface: &'static Surface,
        transport: T,
        options: ServiceOptions,
        config: &ExternalConfig,
    ) -> Result<Self, Error> {
        let authenticator = match options.authenticator {
            Some(authenticator) => authenticator,
            None => config.authenticator()?,
        };
        let service_url = options
            .service_url
            .as_deref()
            .or_else(|| config.service_url());
        let mut client = Self::new(surface, transport, authenticator, service_url);
        client.default_headers = options.headers;
        Ok(client)
    }

    pub fn surface(&self) -> &'static Surface {
        self.surface
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Change the base URL. A trailing `/` is dropped.
    pub fn set_service_url(&mut self, service_url: &str) {
        self.service_url = normalize_url(service_url);
    }

    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Headers sent with every request, below every other header layer.
    pub fn set_default_headers(&mut self, headers: Headers) {
        self.default_headers = headers;
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `params` and build the unauthenticated request descriptor.
    pub fn build<P: OperationParams>(&self, params: &P) -> Result<HttpRequest, Error> {
        let bag = params.to_bag()?;
        self.build_operation(P::OPERATION, Some(&bag))
    }

    /// Untyped form of `build`. `None` is treated as an empty bag.
    pub fn build_operation(
        &self,
        operation: Operation,
        params: Option<&ParamsBag>,
    ) -> Result<HttpRequest, Error> {
        let operation_id =
            self.surface
                .operation_id(operation)
                .ok_or(Error::UnsupportedOperation {
                    operation: operation.name(),
                    service: self.surface.service_name,
                })?;
        let spec = operation.spec();
        missing_params(params, spec.required)?;

        let empty = ParamsBag::new();
        let sdk = sdk_headers(
            self.surface.service_name,
            self.surface.service_version,
            operation_id,
        );
        let request = build_request(
            &self.service_url,
            spec,
            params.unwrap_or(&empty),
            &self.default_headers,
            &sdk,
        );
        debug!(
            operation = operation_id,
            method = request.method.as_str(),
            path = %request.path,
            "built request"
        );
        Ok(request)
    }

    /// Run a typed operation and decode its result.
    pub async fn invoke<P, R>(&self, params: &P) -> Result<DetailedResponse<R>, Error>
    where
        P: OperationParams,
        R: DeserializeOwned,
    {
        let request = self.build(params)?;
        self.send(request).await
    }

    /// Run any operation of the surface with an untyped parameter bag.
    pub async fn execute(
        &self,
        operation: Operation,
        params: Option<ParamsBag>,
    ) -> Result<DetailedResponse<Value>, Error> {
        let request = self.build_operation(operation, params.as_ref())?;
        self.send(request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        mut request: HttpRequest,
    ) -> Result<DetailedResponse<R>, Error> {
        self.authenticator.authenticate(&mut request);
        let response = self.transport.send(request).await?;
        decode(response)
    }
}

impl ServiceClient<ReqwestTransport> {
    /// Build a client whose unset options come from the environment and the
    /// credentials file of `options.service_name`, or of the surface's name.
    pub fn from_environment(
        surface: &'static Surface,
        options: ServiceOptions,
    ) -> Result<Self, Error> {
        let service_name = options
            .service_name
            .clone()
            .unwrap_or_else(|| surface.service_name.to_string());
        let config = ExternalConfig::read(&service_name)?;
        let transport = ReqwestTransport::builder()
            .disable_ssl_verification(config.disable_ssl())
            .build()?;
        Self::from_config(surface, transport, options, &config)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Turn a response into a `DetailedResponse`, or an `Error::Http` for
/// non-2xx statuses. An empty body decodes as JSON `null`.
pub fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<DetailedResponse<R>, Error> {
    if !response.is_success() {
        let message = error_message(&response);
        warn!(status = response.status, %message, "request failed");
        return Err(Error::Http {
            status: response.status,
            message,
        });
    }

    let value = if response.body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&response.body).map_err(Error::Deserialization)?
    };
    let result = serde_json::from_value(value).map_err(Error::Deserialization)?;

    Ok(DetailedResponse {
        result,
        status: response.status,
        status_text: response.status_text,
        headers: response.headers,
    })
}

// Service errors arrive as {"errors":[{"message":..}]}, {"error":..} or
// {"message":..}. Anything else falls back to the body text.
fn error_message(response: &HttpResponse) -> String {
    if let Ok(body) = serde_json::from_slice::<Value>(&response.body) {
        let found = body
            .pointer("/errors/0/message")
            .or_else(|| body.get("error"))
            .or_else(|| body.get("message"))
            .and_then(Value::as_str);
        if let Some(message) = found {
            return message.to_string();
        }
    }
    let text = String::from_utf8_lossy(&response.body).trim().to_string();
    if text.is_empty() {
        response.status_text.clone()
    } else {
        text
    }
}

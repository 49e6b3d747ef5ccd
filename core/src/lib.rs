//! Client SDK for the DataStage data integration flow REST API.
//!
//! # Overview
//! Two service facades cover the two API surfaces of the backend:
//! `DatastageV3` (flows, subflows, ISX migrations) and `DataFlowServiceV3`
//! (flows and migrations). Each operation takes a typed parameter struct and
//! resolves to a `DetailedResponse` holding the decoded result, status and
//! response headers.
//!
//! # Design
//! - Every operation is one row in a static `OperationSpec` table: method,
//!   path template, required parameters, query and body bindings, default
//!   media types. A single `build_request` turns a row plus a `ParamsBag`
//!   into an `HttpRequest` without touching the network.
//! - Required parameters are checked before anything is sent; the error lists
//!   every missing name.
//! - I/O happens behind the `Transport` trait. `ReqwestTransport` is the
//!   default; tests plug in their own.
//! - Headers are layered: service defaults, media defaults, SDK
//!   identification, then per-call overrides.

pub mod auth;
pub mod builder;
pub mod client;
pub mod config;
pub mod data_flow_service;
pub mod datastage;
pub mod error;
pub mod headers;
pub mod http;
pub mod operation;
pub mod params;
pub mod transport;
pub mod types;
pub mod validate;

pub use auth::Authenticator;
pub use builder::build_request;
pub use client::{ServiceClient, ServiceOptions, Surface};
pub use config::ExternalConfig;
pub use data_flow_service::{DataFlowServiceV3, DATA_FLOW_SERVICE};
pub use datastage::{DatastageV3, DATASTAGE};
pub use error::{ConfigError, Error, TransportError};
pub use http::{DetailedResponse, Headers, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use operation::{Operation, OperationSpec};
pub use params::{
    CloneFlowParams, CloneSubflowParams, CompileFlowParams, CreateFlowParams,
    CreateMigrationParams, CreateSubflowParams, DeleteFlowsParams, DeleteMigrationParams,
    DeleteSubflowsParams, GetFlowParams, GetMigrationParams, GetSubflowParams, ListFlowsParams,
    ListSubflowsParams, OperationParams, ParamValue, ParamsBag, UpdateFlowParams,
    UpdateSubflowParams,
};
pub use transport::{ReqwestTransport, Transport};
pub use validate::missing_params;

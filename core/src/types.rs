//! Domain models exchanged with the DataStage service.
//!
//! # Design
//! These types mirror the service's JSON schema with snake_case field names.
//! Fields the service may omit are `Option`; unknown fields are ignored so
//! newer server versions do not break decoding. Free-form objects are kept as
//! `JsonObject`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An arbitrary JSON object.
pub type JsonObject = Map<String, Value>;

/// Result type of operations that return no body.
///
/// Decodes from any JSON value, including the `null` an empty body yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Empty {})
    }
}

/// Category of a created asset. Only a registered service may use this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    System,
    User,
}

/// Action taken when the first import failure occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    Continue,
    Stop,
}

/// How an imported flow whose name is already taken is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    Skip,
    Rename,
    Replace,
    RenameReplace,
}

/// Type of the uploaded attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Isx,
}

/// Pipeline flow document stored in a flow asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_data: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_paramsets: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<Vec<Pipelines>>,
    /// Reference to the primary pipeline within the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtimes: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A single pipeline inside a `PipelineJson` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipelines {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_data: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_ref: Option<String>,
}

/// Visibility rules for an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetEntityRov {
    pub members: Option<Vec<String>>,
    /// 0 public, 8 private, 16 hidden.
    pub mode: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetSystemMetadata {
    pub asset_id: Option<String>,
    pub asset_type: Option<String>,
    pub catalog_id: Option<String>,
    pub create_time: Option<String>,
    pub creator_id: Option<String>,
    pub description: Option<String>,
    pub href: Option<String>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
    pub project_id: Option<String>,
    pub resource_key: Option<String>,
    pub size: Option<i64>,
    pub source_system: Option<JsonObject>,
    pub tags: Option<Vec<String>>,
    pub usage: Option<AssetSystemMetadataUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetSystemMetadataUsage {
    pub access_count: i64,
    pub last_access_time: String,
    pub last_accessor_id: String,
    pub last_modification_time: String,
    pub last_modifier_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefModel {
    pub href: String,
}

/// One page of flows or subflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFlowPagedCollection {
    #[serde(default)]
    pub data_flows: Vec<DataIntgFlow>,
    pub first: Option<HrefModel>,
    pub last: Option<HrefModel>,
    pub limit: Option<i64>,
    pub next: Option<HrefModel>,
    pub prev: Option<HrefModel>,
    pub total_count: Option<i64>,
}

/// A flow asset as returned by create, update, clone and list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlow {
    pub attachments: Option<Vec<JsonObject>>,
    pub entity: Option<DataIntgFlowEntity>,
    pub metadata: Option<AssetSystemMetadata>,
}

/// A flow asset together with its pipeline document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlowJson {
    pub attachments: Option<PipelineJson>,
    pub entity: Option<DataIntgFlowEntity>,
    pub metadata: Option<AssetSystemMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlowEntity {
    pub data_intg_flow: Option<JsonObject>,
    pub data_intg_subflow: Option<JsonObject>,
    pub description: Option<String>,
    pub lock: Option<DataIntgFlowLock>,
    pub name: Option<String>,
    pub rov: Option<AssetEntityRov>,
    pub sub_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlowLock {
    pub entity: Option<DataIntgFlowLockEntity>,
    pub metadata: Option<DataIntgFlowLockMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlowLockEntity {
    pub data_intg_flow_id: Option<String>,
    pub requester: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIntgFlowLockMetadata {
    pub alive: Option<bool>,
}

/// Outcome of compiling a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowCompileResponse {
    pub message: Option<JsonObject>,
    /// For example `ok` or `error`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// State of an import job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub entity: ImportResponseEntity,
    pub metadata: ImportResponseMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResponseEntity {
    pub cancelled_by: Option<String>,
    pub conflict_resolution: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub import_data_flows: Vec<ImportFlow>,
    pub name: Option<String>,
    pub notifications: Option<Vec<ImportNotification>>,
    pub on_failure: Option<String>,
    /// Estimated seconds until completion.
    pub remaining_time: Option<i64>,
    pub start_time: Option<String>,
    pub status: String,
    pub tally: Option<ImportCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResponseMetadata {
    pub catalog_id: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub id: String,
    pub modified_at: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    /// Status URL of the import job.
    pub url: String,
}

/// Import statistics.
///
/// `total = imported + skipped + failed + deprecated + unsupported + pending`,
/// where `imported` already includes renamed and replaced flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCount {
    pub connections_total: Option<i64>,
    pub deprecated: i64,
    pub failed: i64,
    pub imported: i64,
    pub parameter_sets_total: Option<i64>,
    pub pending: i64,
    pub renamed: i64,
    pub replaced: i64,
    pub sequence_jobs_total: Option<i64>,
    pub skipped: i64,
    pub subflows_total: Option<i64>,
    pub table_definitions_total: Option<i64>,
    pub total: i64,
    pub unsupported: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportFlow {
    pub conflict_resolution_status: Option<String>,
    pub end_time: Option<String>,
    pub errors: Option<Vec<DataImportError>>,
    pub id: Option<String>,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub job_type: Option<String>,
    pub name: String,
    pub original_name: Option<String>,
    pub ref_asset_id: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub warnings: Option<Vec<ImportFlowWarning>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFlowWarning {
    pub description: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataImportError {
    pub description: Option<String>,
    pub name: String,
    pub stage_type: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNotification {
    pub created_at: String,
    pub id: String,
    pub status: String,
}

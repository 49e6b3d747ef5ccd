//! Call parameters.
//!
//! # Design
//! Every operation takes a typed parameter struct. Before a request is built
//! the struct is flattened into a `ParamsBag`: a map from camelCase parameter
//! name to value, plus the caller's header overrides. The request builder only
//! ever sees the bag, so one table-driven builder serves all operations.
//!
//! Required fields are `Option` too. An incomplete struct is representable and
//! is rejected by the validator with the full list of missing names rather
//! than failing at the type level one field at a time.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::http::Headers;
use crate::operation::Operation;
use crate::types::{AssetCategory, AttachmentType, ConflictResolution, OnFailure, PipelineJson};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Json(Value),
    Binary(Bytes),
}

/// Parameter values for one call, keyed by camelCase name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsBag {
    values: BTreeMap<String, ParamValue>,
    pub headers: Headers,
}

impl ParamsBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a JSON-valued parameter. `null` clears it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        match value.into() {
            Value::Null => {
                self.values.remove(&name);
            }
            value => {
                self.values.insert(name, ParamValue::Json(value));
            }
        }
        self
    }

    pub fn set_binary(&mut self, name: impl Into<String>, bytes: impl Into<Bytes>) -> &mut Self {
        self.values.insert(name.into(), ParamValue::Binary(bytes.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a bag from a JSON object with camelCase keys.
    ///
    /// A `headers` member, if it is an object, becomes the caller header
    /// overrides. Null members are treated as absent.
    pub fn from_json(value: Value) -> Self {
        let mut bag = ParamsBag::new();
        let Value::Object(map) = value else {
            return bag;
        };
        for (name, value) in map {
            if name == "headers" {
                if let Value::Object(headers) = value {
                    for (header, v) in headers {
                        let v = match v {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        bag.headers.insert(header, v);
                    }
                }
                continue;
            }
            bag.set(name, value);
        }
        bag
    }

    fn from_serialize<T: Serialize>(params: &T, headers: &Headers) -> Result<Self, Error> {
        let value = serde_json::to_value(params).map_err(Error::Serialization)?;
        let mut bag = ParamsBag::from_json(value);
        bag.headers = headers.clone();
        Ok(bag)
    }
}

/// Typed parameters of one operation.
pub trait OperationParams {
    const OPERATION: Operation;

    fn to_bag(&self) -> Result<ParamsBag, Error>;
}

macro_rules! json_params {
    ($($params:ty => $op:expr),+ $(,)?) => {
        $(
            impl OperationParams for $params {
                const OPERATION: Operation = $op;

                fn to_bag(&self) -> Result<ParamsBag, Error> {
                    ParamsBag::from_serialize(self, &self.headers)
                }
            }
        )+
    };
}

json_params! {
    ListFlowsParams => Operation::ListFlows,
    CreateFlowParams => Operation::CreateFlow,
    GetFlowParams => Operation::GetFlow,
    UpdateFlowParams => Operation::UpdateFlow,
    CloneFlowParams => Operation::CloneFlow,
    CompileFlowParams => Operation::CompileFlow,
    DeleteFlowsParams => Operation::DeleteFlows,
    CreateSubflowParams => Operation::CreateSubflow,
    GetSubflowParams => Operation::GetSubflow,
    UpdateSubflowParams => Operation::UpdateSubflow,
    CloneSubflowParams => Operation::CloneSubflow,
    DeleteSubflowsParams => Operation::DeleteSubflows,
    GetMigrationParams => Operation::GetMigration,
    DeleteMigrationParams => Operation::DeleteMigration,
}

impl OperationParams for ListSubflowsParams {
    const OPERATION: Operation = Operation::ListSubflows;

    fn to_bag(&self) -> Result<ParamsBag, Error> {
        ParamsBag::from_serialize(&self.0, &self.0.headers)
    }
}

impl OperationParams for CreateMigrationParams {
    const OPERATION: Operation = Operation::CreateMigration;

    fn to_bag(&self) -> Result<ParamsBag, Error> {
        let mut bag = ParamsBag::from_serialize(self, &self.headers)?;
        if let Some(body) = &self.body {
            bag.set_binary("body", body.clone());
        }
        Ok(bag)
    }
}

/// Parameters for listing flows or subflows.
///
/// `sort` takes one or more comma-separated keys prefixed with `+` or `-`,
/// e.g. `-metadata.create_time,+entity.name`. `entity_name` and
/// `entity_description` match exactly, or by prefix with a `starts:` prefix.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFlowsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Page token to start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Page size; the service defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_description: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl ListFlowsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    pub fn with_entity_description(mut self, description: impl Into<String>) -> Self {
        self.entity_description = Some(description.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Subflow listing takes the same filters as flow listing.
#[derive(Debug, Clone, Default)]
pub struct ListSubflowsParams(pub ListFlowsParams);

impl From<ListFlowsParams> for ListSubflowsParams {
    fn from(params: ListFlowsParams) -> Self {
        Self(params)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_flows: Option<PipelineJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_category: Option<AssetCategory>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CreateFlowParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data_intg_flow_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_pipeline_flows(mut self, pipeline: PipelineJson) -> Self {
        self.pipeline_flows = Some(pipeline);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_asset_category(mut self, category: AssetCategory) -> Self {
        self.asset_category = Some(category);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFlowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl GetFlowParams {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            data_intg_flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_flows: Option<PipelineJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl UpdateFlowParams {
    pub fn new(flow_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            data_intg_flow_id: Some(flow_id.into()),
            data_intg_flow_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_pipeline_flows(mut self, pipeline: PipelineJson) -> Self {
        self.pipeline_flows = Some(pipeline);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneFlowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CloneFlowParams {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            data_intg_flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileFlowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Runtime to compile for, e.g. `dspxosh`. When absent the service uses
    /// the runtime named in the pipeline, falling back to `dspxosh`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_type: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CompileFlowParams {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            data_intg_flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_runtime_type(mut self, runtime_type: impl Into<String>) -> Self {
        self.runtime_type = Some(runtime_type.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Deletes flows and their runs. Running flows are only deleted when `force`
/// is set; the service may answer 202 and finish asynchronously.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFlowsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip)]
    pub headers: Headers,
}

impl DeleteFlowsParams {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Some(ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubflowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_subflow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_flows: Option<PipelineJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_category: Option<AssetCategory>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CreateSubflowParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data_intg_subflow_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_pipeline_flows(mut self, pipeline: PipelineJson) -> Self {
        self.pipeline_flows = Some(pipeline);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_asset_category(mut self, category: AssetCategory) -> Self {
        self.asset_category = Some(category);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSubflowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_subflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl GetSubflowParams {
    pub fn new(subflow_id: impl Into<String>) -> Self {
        Self {
            data_intg_subflow_id: Some(subflow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubflowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_subflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_subflow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_flows: Option<PipelineJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl UpdateSubflowParams {
    pub fn new(subflow_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            data_intg_subflow_id: Some(subflow_id.into()),
            data_intg_subflow_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_pipeline_flows(mut self, pipeline: PipelineJson) -> Self {
        self.pipeline_flows = Some(pipeline);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneSubflowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_intg_subflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CloneSubflowParams {
    pub fn new(subflow_id: impl Into<String>) -> Self {
        Self {
            data_intg_subflow_id: Some(subflow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubflowsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl DeleteSubflowsParams {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Some(ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Uploads an exported ISX file and starts an asynchronous import.
///
/// `body` is sent as the entire request body without transformation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMigrationParams {
    #[serde(skip)]
    pub body: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Defaults to `continue` on the service side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<OnFailure>,
    /// Defaults to `skip` on the service side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_resolution: Option<ConflictResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<AttachmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl CreateMigrationParams {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = Some(on_failure);
        self
    }

    pub fn with_conflict_resolution(mut self, resolution: ConflictResolution) -> Self {
        self.conflict_resolution = Some(resolution);
        self
    }

    pub fn with_attachment_type(mut self, attachment_type: AttachmentType) -> Self {
        self.attachment_type = Some(attachment_type);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMigrationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl GetMigrationParams {
    pub fn new(import_id: impl Into<String>) -> Self {
        Self {
            import_id: Some(import_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Cancels an import if it is still running and removes its record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMigrationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub headers: Headers,
}

impl DeleteMigrationParams {
    pub fn new(import_id: impl Into<String>) -> Self {
        Self {
            import_id: Some(import_id.into()),
            ..Default::default()
        }
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fields_are_not_in_the_bag() {
        let bag = ListFlowsParams::new().with_project_id("p1").to_bag().unwrap();
        assert_eq!(bag.get("projectId"), Some(&ParamValue::Json(json!("p1"))));
        assert!(!bag.contains("catalogId"));
        assert!(!bag.contains("entityName"));
        assert!(!bag.contains("headers"));
    }

    #[test]
    fn from_json_splits_headers_and_drops_nulls() {
        let bag = ParamsBag::from_json(json!({
            "dataIntgFlowId": "abc",
            "catalogId": null,
            "headers": {"Accept": "fake/accept", "X-Count": 3}
        }));
        assert!(bag.contains("dataIntgFlowId"));
        assert!(!bag.contains("catalogId"));
        assert_eq!(bag.headers.get("accept"), Some("fake/accept"));
        assert_eq!(bag.headers.get("X-Count"), Some("3"));
    }

    #[test]
    fn from_json_of_non_object_is_empty() {
        assert!(ParamsBag::from_json(json!(["a"])).is_empty());
    }

    #[test]
    fn enums_and_nested_models_serialize_into_bag() {
        let params = CreateFlowParams::new("flow")
            .with_asset_category(AssetCategory::User)
            .with_pipeline_flows(PipelineJson {
                primary_pipeline: Some("p".to_string()),
                ..Default::default()
            });
        let bag = params.to_bag().unwrap();
        assert_eq!(bag.get("assetCategory"), Some(&ParamValue::Json(json!("user"))));
        assert_eq!(
            bag.get("pipelineFlows"),
            Some(&ParamValue::Json(json!({"primary_pipeline": "p"})))
        );
    }

    #[test]
    fn migration_body_becomes_binary_value() {
        let bag = CreateMigrationParams::new(vec![0u8, 159, 146, 150])
            .with_file_name("export.isx")
            .to_bag()
            .unwrap();
        assert_eq!(
            bag.get("body"),
            Some(&ParamValue::Binary(Bytes::from_static(&[0, 159, 146, 150])))
        );
        assert_eq!(bag.get("fileName"), Some(&ParamValue::Json(json!("export.isx"))));
    }

    #[test]
    fn subflow_listing_reuses_flow_filters() {
        let params: ListSubflowsParams = ListFlowsParams::new()
            .with_entity_name("starts:Sub")
            .with_header("Accept", "fake/accept")
            .into();
        let bag = params.to_bag().unwrap();
        assert_eq!(bag.get("entityName"), Some(&ParamValue::Json(json!("starts:Sub"))));
        assert_eq!(bag.headers.get("Accept"), Some("fake/accept"));
    }

    #[test]
    fn headers_are_carried_into_bag() {
        let bag = GetFlowParams::new("abc")
            .with_header("Accept", "fake/accept")
            .to_bag()
            .unwrap();
        assert_eq!(bag.headers.get("Accept"), Some("fake/accept"));
    }
}

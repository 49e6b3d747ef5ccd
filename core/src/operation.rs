//! Static description of every remote operation.
//!
//! Each `OperationSpec` records where a call's parameters go on the wire:
//! which ones fill path placeholders, which become query parameters and under
//! what key, and which form the body. Both service surfaces share this table;
//! they differ only in the operation ids they report and the subset of
//! operations they expose.

use crate::http::HttpMethod;

/// Media type used for JSON requests and responses.
pub const JSON_MEDIA_TYPE: &str = "application/json;charset=utf-8";

/// Media type used for binary uploads.
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// Every operation known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListFlows,
    CreateFlow,
    GetFlow,
    UpdateFlow,
    CloneFlow,
    CompileFlow,
    DeleteFlows,
    ListSubflows,
    CreateSubflow,
    GetSubflow,
    UpdateSubflow,
    CloneSubflow,
    DeleteSubflows,
    CreateMigration,
    GetMigration,
    DeleteMigration,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::ListFlows,
        Operation::CreateFlow,
        Operation::GetFlow,
        Operation::UpdateFlow,
        Operation::CloneFlow,
        Operation::CompileFlow,
        Operation::DeleteFlows,
        Operation::ListSubflows,
        Operation::CreateSubflow,
        Operation::GetSubflow,
        Operation::UpdateSubflow,
        Operation::CloneSubflow,
        Operation::DeleteSubflows,
        Operation::CreateMigration,
        Operation::GetMigration,
        Operation::DeleteMigration,
    ];

    /// Surface-neutral name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListFlows => "list_flows",
            Operation::CreateFlow => "create_flow",
            Operation::GetFlow => "get_flow",
            Operation::UpdateFlow => "update_flow",
            Operation::CloneFlow => "clone_flow",
            Operation::CompileFlow => "compile_flow",
            Operation::DeleteFlows => "delete_flows",
            Operation::ListSubflows => "list_subflows",
            Operation::CreateSubflow => "create_subflow",
            Operation::GetSubflow => "get_subflow",
            Operation::UpdateSubflow => "update_subflow",
            Operation::CloneSubflow => "clone_subflow",
            Operation::DeleteSubflows => "delete_subflows",
            Operation::CreateMigration => "create_migration",
            Operation::GetMigration => "get_migration",
            Operation::DeleteMigration => "delete_migration",
        }
    }

    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Operation::ListFlows => &LIST_FLOWS,
            Operation::CreateFlow => &CREATE_FLOW,
            Operation::GetFlow => &GET_FLOW,
            Operation::UpdateFlow => &UPDATE_FLOW,
            Operation::CloneFlow => &CLONE_FLOW,
            Operation::CompileFlow => &COMPILE_FLOW,
            Operation::DeleteFlows => &DELETE_FLOWS,
            Operation::ListSubflows => &LIST_SUBFLOWS,
            Operation::CreateSubflow => &CREATE_SUBFLOW,
            Operation::GetSubflow => &GET_SUBFLOW,
            Operation::UpdateSubflow => &UPDATE_SUBFLOW,
            Operation::CloneSubflow => &CLONE_SUBFLOW,
            Operation::DeleteSubflows => &DELETE_SUBFLOWS,
            Operation::CreateMigration => &CREATE_MIGRATION,
            Operation::GetMigration => &GET_MIGRATION,
            Operation::DeleteMigration => &DELETE_MIGRATION,
        }
    }
}

/// Maps a caller-facing parameter name to its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub param: &'static str,
    pub wire: &'static str,
}

const fn bind(param: &'static str, wire: &'static str) -> Binding {
    Binding { param, wire }
}

/// Shape of the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySpec {
    None,
    /// A JSON object built from the listed parameters.
    Json(&'static [Binding]),
    /// The named parameter's bytes form the whole body.
    Binary(&'static str),
}

/// Default `Accept` and `Content-Type` for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaDefaults {
    pub accept: Option<&'static str>,
    pub content_type: Option<&'static str>,
}

impl MediaDefaults {
    pub const NONE: MediaDefaults = MediaDefaults {
        accept: None,
        content_type: None,
    };
    pub const JSON_RESPONSE: MediaDefaults = MediaDefaults {
        accept: Some(JSON_MEDIA_TYPE),
        content_type: None,
    };
    pub const JSON_EXCHANGE: MediaDefaults = MediaDefaults {
        accept: Some(JSON_MEDIA_TYPE),
        content_type: Some(JSON_MEDIA_TYPE),
    };
    pub const BINARY_UPLOAD: MediaDefaults = MediaDefaults {
        accept: Some(JSON_MEDIA_TYPE),
        content_type: Some(OCTET_STREAM_MEDIA_TYPE),
    };
}

/// Immutable per-operation metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub method: HttpMethod,
    /// URL path with `{placeholder}` segments.
    pub path: &'static str,
    /// Placeholder (`wire`) filled from a parameter (`param`).
    pub path_params: &'static [Binding],
    pub required: &'static [&'static str],
    pub query: &'static [Binding],
    pub body: BodySpec,
    pub media: MediaDefaults,
}

const CATALOG_ID: Binding = bind("catalogId", "catalog_id");
const PROJECT_ID: Binding = bind("projectId", "project_id");
const PIPELINE_FLOWS: &[Binding] = &[bind("pipelineFlows", "pipeline_flows")];
const SCOPE_QUERY: &[Binding] = &[CATALOG_ID, PROJECT_ID];
const LIST_QUERY: &[Binding] = &[
    CATALOG_ID,
    PROJECT_ID,
    bind("sort", "sort"),
    bind("start", "start"),
    bind("limit", "limit"),
    bind("entityName", "entity.name"),
    bind("entityDescription", "entity.description"),
];
const FLOW_ID: &[Binding] = &[bind("dataIntgFlowId", "data_intg_flow_id")];
const SUBFLOW_ID: &[Binding] = &[bind("dataIntgSubflowId", "data_intg_subflow_id")];
const IMPORT_ID: &[Binding] = &[bind("importId", "import_id")];

static LIST_FLOWS: OperationSpec = OperationSpec {
    operation: Operation::ListFlows,
    method: HttpMethod::Get,
    path: "/v3/data_intg_flows",
    path_params: &[],
    required: &[],
    query: LIST_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static CREATE_FLOW: OperationSpec = OperationSpec {
    operation: Operation::CreateFlow,
    method: HttpMethod::Post,
    path: "/v3/data_intg_flows",
    path_params: &[],
    required: &["dataIntgFlowName"],
    query: &[
        bind("dataIntgFlowName", "data_intg_flow_name"),
        CATALOG_ID,
        PROJECT_ID,
        bind("assetCategory", "asset_category"),
    ],
    body: BodySpec::Json(PIPELINE_FLOWS),
    media: MediaDefaults::JSON_EXCHANGE,
};

static GET_FLOW: OperationSpec = OperationSpec {
    operation: Operation::GetFlow,
    method: HttpMethod::Get,
    path: "/v3/data_intg_flows/{data_intg_flow_id}",
    path_params: FLOW_ID,
    required: &["dataIntgFlowId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static UPDATE_FLOW: OperationSpec = OperationSpec {
    operation: Operation::UpdateFlow,
    method: HttpMethod::Put,
    path: "/v3/data_intg_flows/{data_intg_flow_id}",
    path_params: FLOW_ID,
    required: &["dataIntgFlowId", "dataIntgFlowName"],
    query: &[
        bind("dataIntgFlowName", "data_intg_flow_name"),
        CATALOG_ID,
        PROJECT_ID,
    ],
    body: BodySpec::Json(PIPELINE_FLOWS),
    media: MediaDefaults::JSON_EXCHANGE,
};

static CLONE_FLOW: OperationSpec = OperationSpec {
    operation: Operation::CloneFlow,
    method: HttpMethod::Post,
    path: "/v3/data_intg_flows/{data_intg_flow_id}/clone",
    path_params: FLOW_ID,
    required: &["dataIntgFlowId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static COMPILE_FLOW: OperationSpec = OperationSpec {
    operation: Operation::CompileFlow,
    method: HttpMethod::Post,
    path: "/v3/ds_codegen/compile/{data_intg_flow_id}",
    path_params: FLOW_ID,
    required: &["dataIntgFlowId"],
    query: &[CATALOG_ID, PROJECT_ID, bind("runtimeType", "runtime_type")],
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static DELETE_FLOWS: OperationSpec = OperationSpec {
    operation: Operation::DeleteFlows,
    method: HttpMethod::Delete,
    path: "/v3/data_intg_flows",
    path_params: &[],
    required: &["id"],
    query: &[bind("id", "id"), CATALOG_ID, PROJECT_ID, bind("force", "force")],
    body: BodySpec::None,
    media: MediaDefaults::NONE,
};

static LIST_SUBFLOWS: OperationSpec = OperationSpec {
    operation: Operation::ListSubflows,
    method: HttpMethod::Get,
    path: "/v3/data_intg_flows/subflows",
    path_params: &[],
    required: &[],
    query: LIST_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static CREATE_SUBFLOW: OperationSpec = OperationSpec {
    operation: Operation::CreateSubflow,
    method: HttpMethod::Post,
    path: "/v3/data_intg_flows/subflows",
    path_params: &[],
    required: &["dataIntgSubflowName"],
    query: &[
        bind("dataIntgSubflowName", "data_intg_subflow_name"),
        CATALOG_ID,
        PROJECT_ID,
        bind("assetCategory", "asset_category"),
    ],
    body: BodySpec::Json(PIPELINE_FLOWS),
    media: MediaDefaults::JSON_EXCHANGE,
};

static GET_SUBFLOW: OperationSpec = OperationSpec {
    operation: Operation::GetSubflow,
    method: HttpMethod::Get,
    path: "/v3/data_intg_flows/subflows/{data_intg_subflow_id}",
    path_params: SUBFLOW_ID,
    required: &["dataIntgSubflowId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static UPDATE_SUBFLOW: OperationSpec = OperationSpec {
    operation: Operation::UpdateSubflow,
    method: HttpMethod::Put,
    path: "/v3/data_intg_flows/subflows/{data_intg_subflow_id}",
    path_params: SUBFLOW_ID,
    required: &["dataIntgSubflowId", "dataIntgSubflowName"],
    query: &[
        bind("dataIntgSubflowName", "data_intg_subflow_name"),
        CATALOG_ID,
        PROJECT_ID,
    ],
    body: BodySpec::Json(PIPELINE_FLOWS),
    media: MediaDefaults::JSON_EXCHANGE,
};

static CLONE_SUBFLOW: OperationSpec = OperationSpec {
    operation: Operation::CloneSubflow,
    method: HttpMethod::Post,
    path: "/v3/data_intg_flows/subflows/{data_intg_subflow_id}/clone",
    path_params: SUBFLOW_ID,
    required: &["dataIntgSubflowId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static DELETE_SUBFLOWS: OperationSpec = OperationSpec {
    operation: Operation::DeleteSubflows,
    method: HttpMethod::Delete,
    path: "/v3/data_intg_flows/subflows",
    path_params: &[],
    required: &["id"],
    query: &[bind("id", "id"), CATALOG_ID, PROJECT_ID],
    body: BodySpec::None,
    media: MediaDefaults::NONE,
};

static CREATE_MIGRATION: OperationSpec = OperationSpec {
    operation: Operation::CreateMigration,
    method: HttpMethod::Post,
    path: "/v3/migration/isx_imports",
    path_params: &[],
    required: &["body"],
    query: &[
        CATALOG_ID,
        PROJECT_ID,
        bind("onFailure", "on_failure"),
        bind("conflictResolution", "conflict_resolution"),
        bind("attachmentType", "attachment_type"),
        bind("fileName", "file_name"),
    ],
    body: BodySpec::Binary("body"),
    media: MediaDefaults::BINARY_UPLOAD,
};

static GET_MIGRATION: OperationSpec = OperationSpec {
    operation: Operation::GetMigration,
    method: HttpMethod::Get,
    path: "/v3/migration/isx_imports/{import_id}",
    path_params: IMPORT_ID,
    required: &["importId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::JSON_RESPONSE,
};

static DELETE_MIGRATION: OperationSpec = OperationSpec {
    operation: Operation::DeleteMigration,
    method: HttpMethod::Delete,
    path: "/v3/migration/isx_imports/{import_id}",
    path_params: IMPORT_ID,
    required: &["importId"],
    query: SCOPE_QUERY,
    body: BodySpec::None,
    media: MediaDefaults::NONE,
};

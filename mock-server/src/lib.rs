//! In-memory stand-in for the DataStage flow service.
//!
//! Serves the `/v3` flow, subflow, compile and ISX migration endpoints with
//! enough fidelity for client integration tests. Flows live in a single
//! process-wide store; nothing is persisted.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Flows and subflows share one shape and differ only in naming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    DataIntgFlow,
    DataIntgSubflow,
}

impl AssetKind {
    fn name_param(self) -> &'static str {
        match self {
            AssetKind::DataIntgFlow => "data_intg_flow_name",
            AssetKind::DataIntgSubflow => "data_intg_subflow_name",
        }
    }

    fn asset_type(self) -> &'static str {
        match self {
            AssetKind::DataIntgFlow => "data_intg_flow",
            AssetKind::DataIntgSubflow => "data_intg_subflow",
        }
    }
}

/// Project or catalog an asset belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Project(String),
    Catalog(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub kind: AssetKind,
    pub name: String,
    pub scope: Scope,
    pub pipeline: Option<Value>,
}

impl Asset {
    fn metadata(&self) -> Value {
        let mut metadata = json!({
            "asset_id": self.id,
            "asset_type": self.kind.asset_type(),
            "name": self.name,
            "href": format!("/v3/data_intg_flows/{}", self.id),
        });
        let (key, value) = match &self.scope {
            Scope::Project(id) => ("project_id", id),
            Scope::Catalog(id) => ("catalog_id", id),
        };
        metadata[key] = json!(value);
        metadata
    }

    /// Shape returned by create, update, clone and list.
    pub fn summary(&self) -> Value {
        let mut entity = json!({ "name": self.name });
        entity[self.kind.asset_type()] = json!({});
        json!({ "metadata": self.metadata(), "entity": entity })
    }

    /// Shape returned by get: the summary plus the pipeline document.
    pub fn detail(&self) -> Value {
        let mut detail = self.summary();
        detail["attachments"] = self.pipeline.clone().unwrap_or_else(|| json!({}));
        detail
    }
}

/// ISX import job. Imports complete as soon as they are created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Import {
    pub id: String,
    pub scope: Scope,
    pub name: Option<String>,
    pub bytes: usize,
    pub on_failure: String,
    pub conflict_resolution: String,
}

impl Import {
    pub fn to_json(&self) -> Value {
        let mut metadata = json!({
            "id": self.id,
            "url": format!("/v3/migration/isx_imports/{}", self.id),
        });
        if let Some(name) = &self.name {
            metadata["name"] = json!(name);
        }
        match &self.scope {
            Scope::Project(id) => metadata["project_id"] = json!(id),
            Scope::Catalog(id) => metadata["catalog_id"] = json!(id),
        }
        json!({
            "metadata": metadata,
            "entity": {
                "status": "completed",
                "on_failure": self.on_failure,
                "conflict_resolution": self.conflict_resolution,
                "remaining_time": 0,
                "import_data_flows": [],
                "tally": {
                    "deprecated": 0, "failed": 0, "imported": 0, "pending": 0,
                    "renamed": 0, "replaced": 0, "skipped": 0, "total": 0,
                    "unsupported": 0
                },
                "uploaded_bytes": self.bytes
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub assets: HashMap<String, Asset>,
    pub imports: HashMap<String, Import>,
}

pub type Db = Arc<RwLock<Store>>;

/// Error body in the service's `{"trace", "errors": [...]}` format.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }

    fn not_found(what: &str, id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", format!("{what} {id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = self.status.as_u16(), message = %self.message, "rejecting request");
        let body = json!({
            "trace": Uuid::new_v4().to_string(),
            "errors": [{ "code": self.code, "message": self.message }]
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Query parameters accepted across the API. Unused ones are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    pub project_id: Option<String>,
    pub catalog_id: Option<String>,
    pub data_intg_flow_name: Option<String>,
    pub data_intg_subflow_name: Option<String>,
    pub sort: Option<String>,
    pub start: Option<String>,
    pub limit: Option<usize>,
    #[serde(rename = "entity.name")]
    pub entity_name: Option<String>,
    #[serde(rename = "entity.description")]
    pub entity_description: Option<String>,
    pub id: Option<String>,
    pub force: Option<bool>,
    pub runtime_type: Option<String>,
    pub on_failure: Option<String>,
    pub conflict_resolution: Option<String>,
    pub attachment_type: Option<String>,
    pub file_name: Option<String>,
}

impl Params {
    fn scope(&self) -> ApiResult<Scope> {
        match (&self.project_id, &self.catalog_id) {
            (Some(project), _) => Ok(Scope::Project(project.clone())),
            (None, Some(catalog)) => Ok(Scope::Catalog(catalog.clone())),
            (None, None) => Err(ApiError::bad_request(
                "either project_id or catalog_id must be set",
            )),
        }
    }

    fn name(&self, kind: AssetKind) -> ApiResult<String> {
        let name = match kind {
            AssetKind::DataIntgFlow => &self.data_intg_flow_name,
            AssetKind::DataIntgSubflow => &self.data_intg_subflow_name,
        };
        name.clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::bad_request(format!("{} is required", kind.name_param())))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FlowBody {
    pub pipeline_flows: Option<Value>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/v3/data_intg_flows",
            get(list_flows).post(create_flow).delete(delete_flows),
        )
        .route("/v3/data_intg_flows/{id}", get(get_flow).put(update_flow))
        .route("/v3/data_intg_flows/{id}/clone", post(clone_flow))
        .route(
            "/v3/data_intg_flows/subflows",
            get(list_subflows).post(create_subflow).delete(delete_subflows),
        )
        .route(
            "/v3/data_intg_flows/subflows/{id}",
            get(get_subflow).put(update_subflow),
        )
        .route("/v3/data_intg_flows/subflows/{id}/clone", post(clone_subflow))
        .route("/v3/ds_codegen/compile/{id}", post(compile_flow))
        .route("/v3/migration/isx_imports", post(create_import))
        .route(
            "/v3/migration/isx_imports/{id}",
            get(get_import).delete(delete_import),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- shared asset handlers ---

async fn list_assets(db: &Db, kind: AssetKind, params: &Params) -> ApiResult<Json<Value>> {
    let scope = params.scope()?;
    let store = db.read().await;
    let mut assets: Vec<&Asset> = store
        .assets
        .values()
        .filter(|a| a.kind == kind && a.scope == scope)
        .filter(|a| matches_filter(&a.name, params.entity_name.as_deref()))
        .collect();

    let descending = params.sort.as_deref().is_some_and(|s| s.starts_with('-'));
    assets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    if descending {
        assets.reverse();
    }

    let total = assets.len();
    let start: usize = params
        .start
        .as_deref()
        .map(|s| s.parse().map_err(|_| ApiError::bad_request("invalid start")))
        .transpose()?
        .unwrap_or(0);
    let limit = params.limit.unwrap_or(100);
    let page: Vec<Value> = assets
        .iter()
        .skip(start)
        .take(limit)
        .map(|a| a.summary())
        .collect();

    let mut body = json!({
        "data_flows": page,
        "total_count": total,
        "limit": limit,
    });
    let end = start.saturating_add(limit);
    if end < total {
        body["next"] = json!({ "href": format!("?start={end}") });
    }
    Ok(Json(body))
}

// Exact match, or prefix match with a `starts:` prefix.
fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => match f.strip_prefix("starts:") {
            Some(prefix) => value.starts_with(prefix),
            None => value == f,
        },
    }
}

async fn create_asset(
    db: &Db,
    kind: AssetKind,
    params: &Params,
    body: Option<FlowBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let asset = Asset {
        id: Uuid::new_v4().to_string(),
        kind,
        name: params.name(kind)?,
        scope: params.scope()?,
        pipeline: body.and_then(|b| b.pipeline_flows),
    };
    info!(id = %asset.id, name = %asset.name, kind = kind.asset_type(), "created asset");
    let summary = asset.summary();
    db.write().await.assets.insert(asset.id.clone(), asset);
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn get_asset(db: &Db, kind: AssetKind, id: &str, params: &Params) -> ApiResult<Json<Value>> {
    let scope = params.scope()?;
    let store = db.read().await;
    store
        .assets
        .get(id)
        .filter(|a| a.kind == kind && a.scope == scope)
        .map(|a| Json(a.detail()))
        .ok_or_else(|| ApiError::not_found(kind.asset_type(), id))
}

async fn update_asset(
    db: &Db,
    kind: AssetKind,
    id: &str,
    params: &Params,
    body: Option<FlowBody>,
) -> ApiResult<Json<Value>> {
    let scope = params.scope()?;
    let name = params.name(kind)?;
    let mut store = db.write().await;
    let asset = store
        .assets
        .get_mut(id)
        .filter(|a| a.kind == kind && a.scope == scope)
        .ok_or_else(|| ApiError::not_found(kind.asset_type(), id))?;
    asset.name = name;
    if let Some(pipeline) = body.and_then(|b| b.pipeline_flows) {
        asset.pipeline = Some(pipeline);
    }
    Ok(Json(asset.summary()))
}

async fn clone_asset(
    db: &Db,
    kind: AssetKind,
    id: &str,
    params: &Params,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let scope = params.scope()?;
    let mut store = db.write().await;
    let original = store
        .assets
        .get(id)
        .filter(|a| a.kind == kind && a.scope == scope)
        .ok_or_else(|| ApiError::not_found(kind.asset_type(), id))?;
    let copy = Asset {
        id: Uuid::new_v4().to_string(),
        name: format!("{}_copy", original.name),
        ..original.clone()
    };
    let summary = copy.summary();
    store.assets.insert(copy.id.clone(), copy);
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn delete_assets(db: &Db, kind: AssetKind, params: &Params) -> ApiResult<StatusCode> {
    let scope = params.scope()?;
    let ids: Vec<&str> = params
        .id
        .as_deref()
        .map(|ids| ids.split(',').filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    if ids.is_empty() {
        return Err(ApiError::bad_request("id is required"));
    }
    let mut store = db.write().await;
    for id in &ids {
        let owned = store
            .assets
            .get(*id)
            .is_some_and(|a| a.kind == kind && a.scope == scope);
        if owned {
            store.assets.remove(*id);
        }
    }
    info!(count = ids.len(), force = params.force.unwrap_or(false), "deleted assets");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_body(body: &Bytes) -> ApiResult<Option<FlowBody>> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {e}")))
}

// --- flows ---

async fn list_flows(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult<Json<Value>> {
    list_assets(&db, AssetKind::DataIntgFlow, &params).await
}

async fn create_flow(
    State(db): State<Db>,
    Query(params): Query<Params>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    create_asset(&db, AssetKind::DataIntgFlow, &params, parse_body(&body)?).await
}

async fn get_flow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Value>> {
    get_asset(&db, AssetKind::DataIntgFlow, &id, &params).await
}

async fn update_flow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    update_asset(&db, AssetKind::DataIntgFlow, &id, &params, parse_body(&body)?).await
}

async fn clone_flow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    clone_asset(&db, AssetKind::DataIntgFlow, &id, &params).await
}

async fn delete_flows(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult<StatusCode> {
    delete_assets(&db, AssetKind::DataIntgFlow, &params).await
}

async fn compile_flow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Value>> {
    let scope = params.scope()?;
    let store = db.read().await;
    let flow = store
        .assets
        .get(&id)
        .filter(|a| a.kind == AssetKind::DataIntgFlow && a.scope == scope)
        .ok_or_else(|| ApiError::not_found("data_intg_flow", &id))?;
    let runtime = params.runtime_type.as_deref().unwrap_or("dspxosh");
    Ok(Json(json!({
        "type": "ok",
        "message": {
            "flow_name": flow.name,
            "runtime_type": runtime,
        }
    })))
}

// --- subflows ---

async fn list_subflows(
    State(db): State<Db>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Value>> {
    list_assets(&db, AssetKind::DataIntgSubflow, &params).await
}

async fn create_subflow(
    State(db): State<Db>,
    Query(params): Query<Params>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    create_asset(&db, AssetKind::DataIntgSubflow, &params, parse_body(&body)?).await
}

async fn get_subflow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Value>> {
    get_asset(&db, AssetKind::DataIntgSubflow, &id, &params).await
}

async fn update_subflow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    update_asset(&db, AssetKind::DataIntgSubflow, &id, &params, parse_body(&body)?).await
}

async fn clone_subflow(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    clone_asset(&db, AssetKind::DataIntgSubflow, &id, &params).await
}

async fn delete_subflows(
    State(db): State<Db>,
    Query(params): Query<Params>,
) -> ApiResult<StatusCode> {
    delete_assets(&db, AssetKind::DataIntgSubflow, &params).await
}

// --- migrations ---

async fn create_import(
    State(db): State<Db>,
    Query(params): Query<Params>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let scope = params.scope()?;
    if body.is_empty() {
        return Err(ApiError::bad_request("an ISX archive body is required"));
    }
    let import = Import {
        id: Uuid::new_v4().to_string(),
        scope,
        name: params.file_name.clone(),
        bytes: body.len(),
        on_failure: params.on_failure.clone().unwrap_or_else(|| "continue".to_string()),
        conflict_resolution: params
            .conflict_resolution
            .clone()
            .unwrap_or_else(|| "skip".to_string()),
    };
    info!(id = %import.id, bytes = import.bytes, "accepted import");
    let response = import.to_json();
    db.write().await.imports.insert(import.id.clone(), import);
    Ok((StatusCode::ACCEPTED, Json(response)))
}

async fn get_import(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Value>> {
    let scope = params.scope()?;
    let store = db.read().await;
    store
        .imports
        .get(&id)
        .filter(|i| i.scope == scope)
        .map(|i| Json(i.to_json()))
        .ok_or_else(|| ApiError::not_found("import", &id))
}

async fn delete_import(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult<StatusCode> {
    let scope = params.scope()?;
    let mut store = db.write().await;
    let owned = store.imports.get(&id).is_some_and(|i| i.scope == scope);
    if !owned {
        return Err(ApiError::not_found("import", &id));
    }
    store.imports.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(name: &str) -> Asset {
        Asset {
            id: "f1".to_string(),
            kind: AssetKind::DataIntgFlow,
            name: name.to_string(),
            scope: Scope::Project("p1".to_string()),
            pipeline: Some(json!({"doc_type": "pipeline"})),
        }
    }

    #[test]
    fn summary_carries_scope_and_kind() {
        let json = flow("job").summary();
        assert_eq!(json["metadata"]["asset_id"], "f1");
        assert_eq!(json["metadata"]["project_id"], "p1");
        assert_eq!(json["metadata"]["asset_type"], "data_intg_flow");
        assert!(json["metadata"].get("catalog_id").is_none());
        assert_eq!(json["entity"]["name"], "job");
        assert!(json["entity"]["data_intg_flow"].is_object());
    }

    #[test]
    fn detail_includes_pipeline() {
        let json = flow("job").detail();
        assert_eq!(json["attachments"]["doc_type"], "pipeline");
    }

    #[test]
    fn name_filter_supports_prefix() {
        assert!(matches_filter("testFlowJob1", None));
        assert!(matches_filter("testFlowJob1", Some("testFlowJob1")));
        assert!(!matches_filter("testFlowJob1", Some("testFlow")));
        assert!(matches_filter("testFlowJob1", Some("starts:testFlow")));
    }

    #[test]
    fn scope_prefers_project() {
        let params = Params {
            project_id: Some("p".to_string()),
            catalog_id: Some("c".to_string()),
            ..Default::default()
        };
        assert_eq!(params.scope().unwrap(), Scope::Project("p".to_string()));
        assert!(Params::default().scope().is_err());
    }

    #[test]
    fn import_reports_completion() {
        let import = Import {
            id: "i1".to_string(),
            scope: Scope::Catalog("c1".to_string()),
            name: Some("flows.isx".to_string()),
            bytes: 42,
            on_failure: "stop".to_string(),
            conflict_resolution: "rename".to_string(),
        };
        let json = import.to_json();
        assert_eq!(json["metadata"]["url"], "/v3/migration/isx_imports/i1");
        assert_eq!(json["metadata"]["catalog_id"], "c1");
        assert_eq!(json["entity"]["status"], "completed");
        assert_eq!(json["entity"]["uploaded_bytes"], 42);
    }
}

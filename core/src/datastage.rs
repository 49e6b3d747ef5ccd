//! DataStage v3 service facade.
//!
//! Offers every flow, subflow and migration operation. Flows and subflows
//! live in a project or a catalog, so most calls need `project_id` or
//! `catalog_id`; the service rejects calls that set neither.

use crate::auth::Authenticator;
use crate::client::{ServiceClient, ServiceOptions, Surface};
use crate::error::Error;
use crate::http::{DetailedResponse, Headers};
use crate::operation::Operation;
use crate::params::{
    CloneFlowParams, CloneSubflowParams, CompileFlowParams, CreateFlowParams,
    CreateMigrationParams, CreateSubflowParams, DeleteFlowsParams, DeleteMigrationParams,
    DeleteSubflowsParams, GetFlowParams, GetMigrationParams, GetSubflowParams, ListFlowsParams,
    ListSubflowsParams, UpdateFlowParams, UpdateSubflowParams,
};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    DataFlowPagedCollection, DataIntgFlow, DataIntgFlowJson, Empty, FlowCompileResponse,
    ImportResponse,
};

pub type Result<T> = std::result::Result<DetailedResponse<T>, Error>;

pub const DEFAULT_SERVICE_URL: &str = "https://datastage.cloud.ibm.com/data_intg";
pub const DEFAULT_SERVICE_NAME: &str = "datastage";

pub static DATASTAGE: Surface = Surface::new(
    DEFAULT_SERVICE_NAME,
    DEFAULT_SERVICE_URL,
    "v3",
    &[
        (Operation::DeleteFlows, "deleteDatastageFlows"),
        (Operation::ListFlows, "listDatastageFlows"),
        (Operation::CreateFlow, "createDatastageFlows"),
        (Operation::GetFlow, "getDatastageFlows"),
        (Operation::UpdateFlow, "updateDatastageFlows"),
        (Operation::CloneFlow, "cloneDatastageFlows"),
        (Operation::CompileFlow, "compileDatastageFlows"),
        (Operation::DeleteSubflows, "deleteDatastageSubflows"),
        (Operation::ListSubflows, "listDatastageSubflows"),
        (Operation::CreateSubflow, "createDatastageSubflows"),
        (Operation::GetSubflow, "getDatastageSubflows"),
        (Operation::UpdateSubflow, "updateDatastageSubflows"),
        (Operation::CloneSubflow, "cloneDatastageSubflows"),
        (Operation::CreateMigration, "createMigration"),
        (Operation::DeleteMigration, "deleteMigration"),
        (Operation::GetMigration, "getMigration"),
    ],
);

/// Client for the `datastage` service.
#[derive(Debug)]
pub struct DatastageV3<T> {
    client: ServiceClient<T>,
}

impl DatastageV3<ReqwestTransport> {
    /// Construct a client from external configuration.
    ///
    /// The authenticator and URL are read for `options.service_name`
    /// (default `datastage`) unless `options` sets them.
    pub fn new_instance(options: ServiceOptions) -> std::result::Result<Self, Error> {
        Ok(Self {
            client: ServiceClient::from_environment(&DATASTAGE, options)?,
        })
    }
}

impl<T: Transport> DatastageV3<T> {
    pub fn new(transport: T, authenticator: Authenticator, service_url: Option<&str>) -> Self {
        Self {
            client: ServiceClient::new(&DATASTAGE, transport, authenticator, service_url),
        }
    }

    pub fn client(&self) -> &ServiceClient<T> {
        &self.client
    }

    pub fn service_url(&self) -> &str {
        self.client.service_url()
    }

    pub fn set_service_url(&mut self, service_url: &str) {
        self.client.set_service_url(service_url);
    }

    pub fn set_default_headers(&mut self, headers: Headers) {
        self.client.set_default_headers(headers);
    }

    /// Delete flows by id. Their runs are deleted too; `force` also stops
    /// running ones. The service may answer 202 and finish asynchronously.
    pub async fn delete_datastage_flows(&self, params: &DeleteFlowsParams) -> Result<Empty> {
        self.client.invoke(params).await
    }

    /// List flows, one page at a time.
    pub async fn list_datastage_flows(
        &self,
        params: &ListFlowsParams,
    ) -> Result<DataFlowPagedCollection> {
        self.client.invoke(params).await
    }

    pub async fn create_datastage_flows(&self, params: &CreateFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn get_datastage_flows(&self, params: &GetFlowParams) -> Result<DataIntgFlowJson> {
        self.client.invoke(params).await
    }

    /// Replace a flow's name and pipeline.
    pub async fn update_datastage_flows(&self, params: &UpdateFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn clone_datastage_flows(&self, params: &CloneFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    /// Generate the runtime assets of a flow.
    pub async fn compile_datastage_flows(
        &self,
        params: &CompileFlowParams,
    ) -> Result<FlowCompileResponse> {
        self.client.invoke(params).await
    }

    pub async fn delete_datastage_subflows(&self, params: &DeleteSubflowsParams) -> Result<Empty> {
        self.client.invoke(params).await
    }

    pub async fn list_datastage_subflows(
        &self,
        params: &ListSubflowsParams,
    ) -> Result<DataFlowPagedCollection> {
        self.client.invoke(params).await
    }

    pub async fn create_datastage_subflows(
        &self,
        params: &CreateSubflowParams,
    ) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn get_datastage_subflows(
        &self,
        params: &GetSubflowParams,
    ) -> Result<DataIntgFlowJson> {
        self.client.invoke(params).await
    }

    pub async fn update_datastage_subflows(
        &self,
        params: &UpdateSubflowParams,
    ) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn clone_datastage_subflows(
        &self,
        params: &CloneSubflowParams,
    ) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    /// Upload an ISX archive and start importing it.
    ///
    /// The response carries an import id to poll with `get_migration`.
    pub async fn create_migration(&self, params: &CreateMigrationParams) -> Result<ImportResponse> {
        self.client.invoke(params).await
    }

    /// Cancel an import that has not finished.
    pub async fn delete_migration(&self, params: &DeleteMigrationParams) -> Result<Empty> {
        self.client.invoke(params).await
    }

    pub async fn get_migration(&self, params: &GetMigrationParams) -> Result<ImportResponse> {
        self.client.invoke(params).await
    }
}

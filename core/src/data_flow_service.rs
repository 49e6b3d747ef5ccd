//! IBM API for Data Flow Service v3 facade.
//!
//! Same backend and request shapes as `DatastageV3`, without subflows.

use crate::auth::Authenticator;
use crate::client::{ServiceClient, ServiceOptions, Surface};
use crate::datastage::Result;
use crate::error::Error;
use crate::http::Headers;
use crate::operation::Operation;
use crate::params::{
    CloneFlowParams, CompileFlowParams, CreateFlowParams, CreateMigrationParams,
    DeleteFlowsParams, DeleteMigrationParams, GetFlowParams, GetMigrationParams, ListFlowsParams,
    UpdateFlowParams,
};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    DataFlowPagedCollection, DataIntgFlow, DataIntgFlowJson, Empty, FlowCompileResponse,
    ImportResponse,
};

pub const DEFAULT_SERVICE_URL: &str =
    "https://ibm-api-for-data-flow-service.cloud.ibm.com/data_intg";
pub const DEFAULT_SERVICE_NAME: &str = "ibm_api_for_data_flow_service";

pub static DATA_FLOW_SERVICE: Surface = Surface::new(
    DEFAULT_SERVICE_NAME,
    DEFAULT_SERVICE_URL,
    "v3",
    &[
        (Operation::ListFlows, "datastageFlowsList"),
        (Operation::CreateFlow, "datastageFlowsCreate"),
        (Operation::DeleteFlows, "datastageFlowsDelete"),
        (Operation::GetFlow, "datastageFlowsGet"),
        (Operation::UpdateFlow, "datastageFlowsUpdate"),
        (Operation::CloneFlow, "datastageFlowsClone"),
        (Operation::CompileFlow, "datastageFlowsCompile"),
        (Operation::CreateMigration, "migrationCreate"),
        (Operation::GetMigration, "migrationGet"),
        (Operation::DeleteMigration, "migrationDelete"),
    ],
);

/// Client for the `ibm_api_for_data_flow_service` service.
#[derive(Debug)]
pub struct DataFlowServiceV3<T> {
    client: ServiceClient<T>,
}

impl DataFlowServiceV3<ReqwestTransport> {
    pub fn new_instance(options: ServiceOptions) -> std::result::Result<Self, Error> {
        Ok(Self {
            client: ServiceClient::from_environment(&DATA_FLOW_SERVICE, options)?,
        })
    }
}

impl<T: Transport> DataFlowServiceV3<T> {
    pub fn new(transport: T, authenticator: Authenticator, service_url: Option<&str>) -> Self {
        Self {
            client: ServiceClient::new(&DATA_FLOW_SERVICE, transport, authenticator, service_url),
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

    pub async fn datastage_flows_list(
        &self,
        params: &ListFlowsParams,
    ) -> Result<DataFlowPagedCollection> {
        self.client.invoke(params).await
    }

    pub async fn datastage_flows_create(&self, params: &CreateFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn datastage_flows_delete(&self, params: &DeleteFlowsParams) -> Result<Empty> {
        self.client.invoke(params).await
    }

    /// Decodes as `DataIntgFlowJson`: get answers with the pipeline document
    /// as a single `attachments` object, which `DataIntgFlow` cannot hold.
    pub async fn datastage_flows_get(&self, params: &GetFlowParams) -> Result<DataIntgFlowJson> {
        self.client.invoke(params).await
    }

    pub async fn datastage_flows_update(&self, params: &UpdateFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn datastage_flows_clone(&self, params: &CloneFlowParams) -> Result<DataIntgFlow> {
        self.client.invoke(params).await
    }

    pub async fn datastage_flows_compile(
        &self,
        params: &CompileFlowParams,
    ) -> Result<FlowCompileResponse> {
        self.client.invoke(params).await
    }

    pub async fn migration_create(&self, params: &CreateMigrationParams) -> Result<ImportResponse> {
        self.client.invoke(params).await
    }

    pub async fn migration_get(&self, params: &GetMigrationParams) -> Result<ImportResponse> {
        self.client.invoke(params).await
    }

    pub async fn migration_delete(&self, params: &DeleteMigrationParams) -> Result<Empty> {
        self.client.invoke(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use serde_json::json;

    fn service() -> DataFlowServiceV3<ReqwestTransport> {
        DataFlowServiceV3::new(
            ReqwestTransport::new().unwrap(),
            Authenticator::NoAuth,
            None,
        )
    }

    #[test]
    fn uses_its_own_defaults() {
        let svc = service();
        assert_eq!(
            svc.service_url(),
            "https://ibm-api-for-data-flow-service.cloud.ibm.com/data_intg"
        );
        assert_eq!(DATA_FLOW_SERVICE.service_name, DEFAULT_SERVICE_NAME);
        assert_eq!(DEFAULT_SERVICE_NAME, "ibm_api_for_data_flow_service");
    }

    #[test]
    fn reports_its_own_operation_ids() {
        let svc = service();
        let req = svc
            .client()
            .build(&DeleteFlowsParams::new(["a"]).with_project_id("p"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.query_value("id"), Some(&json!(["a"])));
        assert_eq!(
            req.headers.get("X-IBMCloud-SDK-Analytics"),
            Some(
                "service_name=ibm_api_for_data_flow_service;service_version=v3;operation_id=datastageFlowsDelete"
            )
        );
    }
}

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json;charset=utf-8")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn binary_request(uri: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from(bytes))
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_flows_empty() {
    let resp = app()
        .oneshot(request("GET", "/v3/data_intg_flows?project_id=p1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data_flows"], json!([]));
    assert_eq!(body["total_count"], 0);
}

#[tokio::test]
async fn list_without_scope_returns_400() {
    let resp = app()
        .oneshot(request("GET", "/v3/data_intg_flows"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["errors"][0]["message"],
        "either project_id or catalog_id must be set"
    );
    assert!(body["trace"].is_string());
}

#[tokio::test]
async fn list_with_huge_limit_has_no_next_page() {
    let uri = format!(
        "/v3/data_intg_flows?project_id=p1&start=1&limit={}",
        usize::MAX
    );
    let resp = app().oneshot(request("GET", &uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["total_count"], 0);
    assert!(body.get("next").is_none());
}

// --- create ---

#[tokio::test]
async fn create_flow_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/v3/data_intg_flows?data_intg_flow_name=job1&project_id=p1",
            json!({"pipeline_flows": {"doc_type": "pipeline"}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["metadata"]["name"], "job1");
    assert_eq!(body["metadata"]["project_id"], "p1");
    assert!(body["metadata"]["asset_id"].is_string());
}

#[tokio::test]
async fn create_flow_without_name_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/v3/data_intg_flows?project_id=p1",
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_flow_malformed_json_returns_400() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v3/data_intg_flows?data_intg_flow_name=x&project_id=p1")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get / update / delete ---

#[tokio::test]
async fn get_flow_not_found() {
    let resp = app()
        .oneshot(request("GET", "/v3/data_intg_flows/missing?project_id=p1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["code"], "not_found");
}

#[tokio::test]
async fn update_subflow_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/v3/data_intg_flows/subflows/missing?data_intg_subflow_name=s&project_id=p1",
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_without_ids_returns_400() {
    let resp = app()
        .oneshot(request("DELETE", "/v3/data_intg_flows?project_id=p1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compile_unknown_flow_returns_404() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/v3/ds_codegen/compile/missing?project_id=p1&runtime_type=dspxosh",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- migrations ---

#[tokio::test]
async fn create_import_records_size() {
    let resp = app()
        .oneshot(binary_request(
            "/v3/migration/isx_imports?catalog_id=c1&on_failure=stop&file_name=flows.isx",
            vec![0u8, 1, 2, 3, 255],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = body_json(resp).await;
    assert_eq!(body["entity"]["status"], "completed");
    assert_eq!(body["entity"]["on_failure"], "stop");
    assert_eq!(body["entity"]["conflict_resolution"], "skip");
    assert_eq!(body["entity"]["uploaded_bytes"], 5);
    assert_eq!(body["metadata"]["name"], "flows.isx");
}

#[tokio::test]
async fn create_import_without_body_returns_400() {
    let resp = app()
        .oneshot(binary_request("/v3/migration/isx_imports?project_id=p1", Vec::new()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_import_not_found() {
    let resp = app()
        .oneshot(request("DELETE", "/v3/migration/isx_imports/missing?project_id=p1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full flow lifecycle ---

#[tokio::test]
async fn flow_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two flows
    let mut ids = Vec::new();
    for name in ["beta", "alpha"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                &format!("/v3/data_intg_flows?data_intg_flow_name={name}&project_id=p1"),
                json!({"pipeline_flows": {"doc_type": "pipeline", "id": name}}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        ids.push(body["metadata"]["asset_id"].as_str().unwrap().to_string());
    }

    // list is sorted by name and scoped to the project
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/v3/data_intg_flows?project_id=p1&sort=%2Bentity.name"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["data_flows"][0]["metadata"]["name"], "alpha");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/v3/data_intg_flows?project_id=other"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["total_count"], 0);

    // prefix filter
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/v3/data_intg_flows?project_id=p1&entity.name=starts:be"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["data_flows"][0]["metadata"]["name"], "beta");

    // get returns the pipeline
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", &format!("/v3/data_intg_flows/{}?project_id=p1", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["attachments"]["id"], "beta");

    // update renames
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!(
                "/v3/data_intg_flows/{}?data_intg_flow_name=gamma&project_id=p1",
                ids[0]
            ),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["metadata"]["name"], "gamma");

    // clone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request(
            "POST",
            &format!("/v3/data_intg_flows/{}/clone?project_id=p1", ids[1]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let clone = body_json(resp).await;
    assert_eq!(clone["metadata"]["name"], "alpha_copy");
    let clone_id = clone["metadata"]["asset_id"].as_str().unwrap().to_string();

    // compile
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request(
            "POST",
            &format!("/v3/ds_codegen/compile/{clone_id}?project_id=p1"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["type"], "ok");

    // delete all three in one call
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request(
            "DELETE",
            &format!(
                "/v3/data_intg_flows?id={},{},{clone_id}&project_id=p1&force=true",
                ids[0], ids[1]
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/v3/data_intg_flows?project_id=p1"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["total_count"], 0);
}

#[tokio::test]
async fn subflows_are_separate_from_flows() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/v3/data_intg_flows/subflows?data_intg_subflow_name=sub&catalog_id=c1",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["metadata"]["asset_id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/v3/data_intg_flows?catalog_id=c1"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["total_count"], 0);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", &format!("/v3/data_intg_flows/{id}?catalog_id=c1")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request(
            "GET",
            &format!("/v3/data_intg_flows/subflows/{id}?catalog_id=c1"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["entity"]["name"], "sub");
}

use serde_json::Value;

use crate::common::{TestApp, routes, test_config};

#[tokio::test]
async fn serves_public_index() {
    let app = TestApp::spawn().await;

    let res = app.get("/").await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("<h1>ranking</h1>"));
}

#[tokio::test]
async fn serves_openapi_document() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/api/personas",
        "/api/persona/{id}",
        "/api/personas/{id}",
        "/api/incidencias",
        "/api/incidencias/{id}",
        "/api/ranking",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn data_survives_restart() {
    let app = TestApp::spawn().await;
    let ana = app.create_person("Ana").await;
    let incident = app.create_incident(&ana).await;

    let document: Value =
        serde_json::from_slice(&std::fs::read(app.data_file()).unwrap()).unwrap();
    assert_eq!(document["personas"][0]["id"], ana.as_str());
    assert_eq!(document["incidencias"][0]["id"], incident.as_str());

    let TestApp { dir, .. } = app;
    let restarted = TestApp::spawn_in(dir).await;

    let res = restarted.get(&routes::person(&ana)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["nombre"], "Ana");
    assert_eq!(res.body["puntos"], 1);
}

#[tokio::test]
async fn unknown_api_route_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/nothing-here").await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}{}", app.addr, routes::PEOPLE),
        )
        .header("Origin", "http://admin.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success(), "status {}", res.status());
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"), "allowed methods: {methods}");
    assert!(methods.contains("DELETE"), "allowed methods: {methods}");
}

#[tokio::test]
async fn simple_request_carries_cors_header() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .get(format!("http://{}{}", app.addr, routes::RANKING))
        .header("Origin", "http://public.example")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn root_upload_prefix_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.storage.public_prefix = "/".to_string();

    let result = incident_board::build_state(config).await;
    assert!(result.is_err(), "photos must not be published at the site root");
}

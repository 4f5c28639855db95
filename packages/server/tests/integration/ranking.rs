use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn empty_ranking() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::RANKING).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn orders_by_points_descending() {
    let app = TestApp::spawn().await;
    let ana = app.create_person("Ana").await;
    let luis = app.create_person("Luis").await;
    let marta = app.create_person("Marta").await;

    app.create_incident(&luis).await;
    app.create_incident(&marta).await;
    app.create_incident(&marta).await;
    let last = app.create_incident(&marta).await;

    let res = app.get(routes::RANKING).await;
    let rows = res.body.as_array().unwrap();
    let order: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(order, [marta.as_str(), luis.as_str(), ana.as_str()]);

    let points: Vec<u64> = rows.iter().map(|r| r["puntos"].as_u64().unwrap()).collect();
    assert_eq!(points, [3, 1, 0]);

    let incidents = app.get(routes::INCIDENTS).await;
    let last_at = incidents
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"] == last.as_str())
        .map(|i| i["fecha"].clone())
        .unwrap();
    assert_eq!(rows[0]["ultimaIncidencia"], last_at);
    assert!(rows[2]["ultimaIncidencia"].is_null());
    assert_eq!(rows[0]["nombre"], "Marta");
}

#[tokio::test]
async fn ties_keep_creation_order() {
    let app = TestApp::spawn().await;
    let ana = app.create_person("Ana").await;
    let luis = app.create_person("Luis").await;
    let marta = app.create_person("Marta").await;

    app.create_incident(&marta).await;
    app.create_incident(&ana).await;

    let res = app.get(routes::RANKING).await;
    let order: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, [ana.as_str(), marta.as_str(), luis.as_str()]);
}

#[tokio::test]
async fn reflects_deletes() {
    let app = TestApp::spawn().await;
    let ana = app.create_person("Ana").await;
    let luis = app.create_person("Luis").await;
    let first = app.create_incident(&ana).await;
    app.create_incident(&ana).await;
    app.create_incident(&luis).await;

    app.delete(&routes::incident(&first)).await;
    let res = app.get(routes::RANKING).await;
    assert_eq!(res.body[0]["puntos"], 1);
    assert_eq!(res.body[1]["puntos"], 1);

    app.delete(&routes::delete_person(&ana)).await;
    let res = app.get(routes::RANKING).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["id"], luis.as_str());
}

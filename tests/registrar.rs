mod common;

use axum::http::{header, StatusCode};
use serde_json::json;

use common::{delete, get, post, put, stub_models, Stub};
use score_api::db::Store;

const RESOURCES: [&str; 9] = [
    "players", "teams", "leagues", "seasons", "locations", "games", "rulesets", "plays", "matches",
];

#[tokio::test]
async fn every_controller_is_mounted() {
    let stub = Stub::new();
    stub.on("get", &[], json!([]));
    let app = score_api::app(&stub_models(&stub));

    for resource in RESOURCES {
        let res = get(app.clone(), &format!("/{resource}/")).await;
        assert_eq!(res.status, StatusCode::OK, "GET /{resource}/");
        assert_eq!(res.body, Some(json!([])), "GET /{resource}/");
    }

    assert_eq!(stub.calls().len(), 9);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let stub = Stub::new();
    let app = score_api::app(&stub_models(&stub));

    let res = get(app, "/referees/").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn every_resource_answers_by_id() {
    let stub = Stub::new();
    stub.on("get_by_id", &[json!(1)], json!({ "id": 1, "name": "Found" }));
    let app = score_api::app(&stub_models(&stub));

    for resource in RESOURCES {
        let res = get(app.clone(), &format!("/{resource}/1")).await;
        assert_eq!(res.status, StatusCode::OK, "GET /{resource}/1");
        assert_eq!(res.content_type.as_deref(), Some("application/json"));
        assert_eq!(res.body, Some(json!({ "id": 1, "name": "Found" })), "GET /{resource}/1");

        let res = get(app.clone(), &format!("/{resource}/2")).await;
        assert_eq!(res.status, StatusCode::NO_CONTENT, "GET /{resource}/2");
        assert_eq!(res.body, None, "GET /{resource}/2");
    }

    let ids: Vec<_> = stub.calls().into_iter().map(|(_, args)| args).collect();
    assert_eq!(ids.len(), 18);
    assert!(ids.iter().all(|args| args[0].is_i64()));
}

#[tokio::test]
async fn unsupported_verbs_list_the_allowed_ones() {
    let stub = Stub::new();
    let app = score_api::app(&stub_models(&stub));

    let res = delete(app, "/teams/1").await;

    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    let allow = res.headers[header::ALLOW].to_str().unwrap();
    let verbs: Vec<&str> = allow.split(',').map(str::trim).collect();
    assert!(verbs.contains(&"GET"), "Allow: {allow}");
    assert!(verbs.contains(&"PUT"), "Allow: {allow}");
    assert!(!verbs.contains(&"DELETE"), "Allow: {allow}");
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn end_to_end_against_sqlite() {
    let store = Store::connect("sqlite::memory:").await.unwrap();
    store.migrate().await.unwrap();
    let app = score_api::app(&store.models());

    let res = post(app.clone(), "/teams", json!({ "name": "Dolphins" })).await;
    assert_eq!(res.body, Some(json!({ "id": 1, "name": "Dolphins" })));

    post(app.clone(), "/players", json!({ "name": "Marino" })).await;
    let res = put(app.clone(), "/teams/1/player/1", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Some(json!([{ "id": 1, "name": "Marino" }])));

    let res = get(app.clone(), "/teams/1/roster").await;
    assert_eq!(res.body, Some(json!([{ "id": 1, "name": "Marino" }])));

    let res = put(app.clone(), "/teams/1", Some(json!({ "city": "Miami" }))).await;
    assert_eq!(
        res.body,
        Some(json!({ "id": 1, "name": "Dolphins", "city": "Miami" }))
    );

    let res = get(app.clone(), "/teams/2").await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    post(app.clone(), "/plays", json!({ "match_id": 11 })).await;
    let res = delete(app.clone(), "/plays/1").await;
    assert_eq!(res.body, Some(json!({ "id": 1, "match_id": 11 })));

    let res = delete(app.clone(), "/plays/1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Some(json!({})));

    let res = put(app.clone(), "/seasons/1/team/1", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    post(app.clone(), "/seasons", json!({ "name": "Fall" })).await;
    let res = get(app.clone(), "/seasons/1/teams").await;
    assert_eq!(res.body, Some(json!([])));

    let res = post(app, "/games", json!(["not", "an", "object"])).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

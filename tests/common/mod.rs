#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use score_api::error::ModelError;
use score_api::models::*;

/// Model double that answers from canned `(method, args)` pairs and
/// records every call it receives.
#[derive(Default)]
pub struct Stub {
    answers: Mutex<Vec<(String, Vec<Value>, Value)>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl Stub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `method(args...)` with `response`.
    pub fn on(&self, method: &str, args: &[Value], response: Value) {
        self.answers
            .lock()
            .unwrap()
            .push((method.to_string(), args.to_vec(), response));
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &str, args: Vec<Value>) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), args.clone()));

        self.answers
            .lock()
            .unwrap()
            .iter()
            .find(|(m, a, _)| m == method && *a == args)
            .map(|(_, _, response)| response.clone())
    }

    fn required(&self, method: &str, args: Vec<Value>) -> Result<Value, ModelError> {
        self.answer(method, args)
            .ok_or_else(|| ModelError::InvalidPayload(format!("unexpected call to {method}")))
    }

    fn list(&self, method: &str, args: Vec<Value>) -> Result<Vec<Value>, ModelError> {
        match self.required(method, args)? {
            Value::Array(items) => Ok(items),
            other => panic!("{method} was stubbed with a non-array: {other}"),
        }
    }
}

#[async_trait]
impl ResourceModel for Stub {
    async fn get(&self) -> Result<Vec<Value>, ModelError> {
        self.list("get", vec![])
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Value>, ModelError> {
        Ok(self.answer("get_by_id", vec![id.into()]))
    }

    async fn create(&self, payload: Value) -> Result<Value, ModelError> {
        self.required("create", vec![payload])
    }

    async fn update_by_id(&self, id: i64, payload: Value) -> Result<Value, ModelError> {
        self.required("update_by_id", vec![id.into(), payload])
    }
}

#[async_trait]
impl DeletableModel for Stub {
    async fn delete_by_id(&self, id: i64) -> Result<Value, ModelError> {
        self.required("delete_by_id", vec![id.into()])
    }
}

impl PlayerModel for Stub {}
impl LocationModel for Stub {}
impl PlayModel for Stub {}

#[async_trait]
impl TeamModel for Stub {
    async fn get_roster(&self, team_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("get_roster", vec![team_id.into()])
    }

    async fn add_player(&self, player_id: i64, team_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("add_player", vec![player_id.into(), team_id.into()])
    }

    async fn remove_player(&self, player_id: i64, team_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("remove_player", vec![player_id.into(), team_id.into()])
    }
}

#[async_trait]
impl LeagueModel for Stub {
    async fn get_seasons(&self, league_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("get_seasons", vec![league_id.into()])
    }
}

#[async_trait]
impl SeasonModel for Stub {
    async fn get_teams(&self, season_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("get_teams", vec![season_id.into()])
    }

    async fn add_team(&self, team_id: i64, season_id: i64) -> Result<Value, ModelError> {
        self.required("add_team", vec![team_id.into(), season_id.into()])
    }

    async fn remove_team(&self, team_id: i64, season_id: i64) -> Result<Value, ModelError> {
        self.required("remove_team", vec![team_id.into(), season_id.into()])
    }
}

#[async_trait]
impl GameModel for Stub {
    async fn get_by_formatter_id(&self, formatter_id: &str) -> Result<Vec<Value>, ModelError> {
        self.list("get_by_formatter_id", vec![formatter_id.into()])
    }
}

#[async_trait]
impl RulesetModel for Stub {
    async fn get_by_game_id(&self, game_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("get_by_game_id", vec![game_id.into()])
    }
}

#[async_trait]
impl MatchModel for Stub {
    async fn get_plays(&self, match_id: i64) -> Result<Vec<Value>, ModelError> {
        self.list("get_plays", vec![match_id.into()])
    }
}

/// Every entity kind backed by the same stub.
pub fn stub_models(stub: &Arc<Stub>) -> Models {
    Models {
        players: stub.clone(),
        teams: stub.clone(),
        leagues: stub.clone(),
        seasons: stub.clone(),
        locations: stub.clone(),
        games: stub.clone(),
        rulesets: stub.clone(),
        plays: stub.clone(),
        matches: stub.clone(),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
    /// `None` when the response had no body at all. Non-JSON bodies are
    /// kept as a JSON string so failures show what came back.
    pub body: Option<Value>,
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        None
    } else {
        Some(
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
        )
    };

    TestResponse {
        status,
        content_type,
        headers,
        body,
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: Router, uri: &str, body: Option<Value>) -> TestResponse {
    send(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

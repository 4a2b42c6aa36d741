//! End-to-end pipeline coverage over a sample "teams" domain: an axum
//! router wired to the create/get/update handlers through a shared
//! in-memory repository, driven with `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceExt;

use request_pipeline::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Team {
    id: i64,
    name: String,
}

impl Entity for Team {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Serialize)]
struct TeamResponse {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TeamBody {
    name: String,
}

struct PostTeam {
    name: String,
}

impl CreateRequest for PostTeam {
    type Payload = String;

    fn payload(&self) -> &String {
        &self.name
    }
}

impl ValidateRequest for PostTeam {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.is_empty() {
            errors.add("name", "Name is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

struct PostTeamHandler {
    repository: Arc<InMemoryRepository<Team>>,
    next_id: AtomicI64,
}

impl CreateHandler for PostTeamHandler {
    type Request = PostTeam;
    type Entity = Team;
    type Repo = InMemoryRepository<Team>;

    fn repository(&self) -> &Self::Repo {
        &self.repository
    }

    fn build_entity(&self, request: &PostTeam) -> Team {
        Team {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: request.payload().clone(),
        }
    }
}

struct GetTeam {
    id: i64,
}

struct GetTeamHandler {
    repository: Arc<InMemoryRepository<Team>>,
}

impl GetHandler for GetTeamHandler {
    type Request = GetTeam;
    type Entity = Team;
    type Response = TeamResponse;
    type Repo = InMemoryRepository<Team>;

    fn repository(&self) -> &Self::Repo {
        &self.repository
    }

    fn entity_id(&self, request: &GetTeam) -> i64 {
        request.id
    }

    fn to_response(&self, entity: Team) -> TeamResponse {
        TeamResponse {
            id: entity.id,
            name: entity.name,
        }
    }
}

struct PutTeam {
    id: i64,
    name: String,
}

impl ValidateRequest for PutTeam {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.is_empty() {
            errors.add("name", "Name is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

struct PutTeamHandler {
    repository: Arc<InMemoryRepository<Team>>,
}

impl UpdateHandler for PutTeamHandler {
    type Request = PutTeam;
    type Entity = Team;
    type Repo = InMemoryRepository<Team>;

    fn repository(&self) -> &Self::Repo {
        &self.repository
    }

    fn entity_id(&self, request: &PutTeam) -> i64 {
        request.id
    }

    fn apply(&self, request: &PutTeam, entity: &mut Team) {
        entity.name = request.name.clone();
    }
}

struct AppState {
    post: PostTeamHandler,
    get: GetTeamHandler,
    put: PutTeamHandler,
}

fn internal_error(error: &RepositoryError) -> Response {
    // Fallback for storage failures the pipeline deliberately leaves
    // untranslated; the in-memory backend never takes this path here.
    tracing::error!(%error, "repository failure");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn post_team(State(state): State<Arc<AppState>>, Json(body): Json<TeamBody>) -> Response {
    let request = PostTeam { name: body.name };
    match handle_validated(&state.post, request, CancellationToken::new()).await {
        Ok(envelope) => envelope.into_response(),
        Err(error) => internal_error(&error),
    }
}

async fn get_team(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    match state.get.handle(GetTeam { id }, CancellationToken::new()).await {
        Ok(envelope) => envelope.into_response(),
        Err(error) => internal_error(&error),
    }
}

async fn put_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<TeamBody>,
) -> Response {
    let request = PutTeam {
        id,
        name: body.name,
    };
    match handle_update_validated(&state.put, request, CancellationToken::new()).await {
        Ok(envelope) => envelope.into_response(),
        Err(error) => internal_error(&error),
    }
}

fn test_app() -> Router {
    let repository = Arc::new(InMemoryRepository::new());
    let state = Arc::new(AppState {
        post: PostTeamHandler {
            repository: Arc::clone(&repository),
            next_id: AtomicI64::new(42),
        },
        get: GetTeamHandler {
            repository: Arc::clone(&repository),
        },
        put: PutTeamHandler { repository },
    });

    Router::new()
        .route("/teams", post(post_team))
        .route("/teams/{id}", get(get_team))
        .route("/teams/{id}", put(put_team))
        .with_state(state)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn post_returns_new_team_id() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Tigers" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id: i64 = serde_json::from_slice(&body).unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn post_then_get_round_trips() {
    let app = test_app();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Tigers" })),
    )
    .await;
    let id: i64 = serde_json::from_slice(&body).unwrap();

    let request = Request::builder()
        .uri(format!("/teams/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let team: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(team["id"], id);
    assert_eq!(team["name"], "Tigers");
}

#[tokio::test]
async fn post_with_empty_name_is_bad_request() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(errors["name"][0], "Name is required");
}

#[tokio::test]
async fn get_missing_team_is_not_found_with_empty_body() {
    let app = test_app();

    let request = Request::builder()
        .uri("/teams/999")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn put_renames_existing_team() {
    let app = test_app();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Tigers" })),
    )
    .await;
    let id: i64 = serde_json::from_slice(&body).unwrap();

    let (status, _) = send(
        &app,
        json_request(Method::PUT, &format!("/teams/{id}"), json!({ "name": "Lions" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri(format!("/teams/{id}"))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, request).await;
    let team: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(team["name"], "Lions");
}

#[tokio::test]
async fn put_missing_team_is_not_found() {
    let app = test_app();

    let (status, _) = send(
        &app,
        json_request(Method::PUT, "/teams/999", json!({ "name": "Lions" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_with_empty_name_is_bad_request() {
    let app = test_app();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Tigers" })),
    )
    .await;
    let id: i64 = serde_json::from_slice(&body).unwrap();

    let (status, body) = send(
        &app,
        json_request(Method::PUT, &format!("/teams/{id}"), json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(errors["name"][0], "Name is required");
}

#[tokio::test]
async fn consecutive_posts_assign_distinct_ids() {
    let app = test_app();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Tigers" })),
    )
    .await;
    let first: i64 = serde_json::from_slice(&body).unwrap();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/teams", json!({ "name": "Lions" })),
    )
    .await;
    let second: i64 = serde_json::from_slice(&body).unwrap();

    assert_ne!(first, second);
}

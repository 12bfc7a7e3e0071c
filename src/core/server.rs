//! Embedded web server hosting the interactive family tree page
//!
//! Serves the rendered page at `/` and a small JSON API under `/api` that
//! the page's editing panel talks to. Every mutation is applied to a working
//! copy of the tree, validated as a whole, and persisted before it replaces
//! the shared tree, so the stored file never holds an inconsistent tree.

use crate::core::generations;
use crate::core::models::{FamilyTree, Gender, Person};
use crate::core::store;
use crate::core::view::graph_data::{self, VisEdge, VisNode};
use crate::core::view::{HtmlRenderer, PageRenderer, ViewContext};
use crate::{error, info};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
struct AppState {
    tree: Arc<RwLock<FamilyTree>>,
    data_path: Arc<PathBuf>,
    title: Arc<String>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Compact person record for the editor's pick lists
#[derive(Serialize)]
struct PersonSummary {
    id: String,
    name: String,
}

/// Graph dataset returned by `GET /api/graph`
#[derive(Serialize)]
struct GraphResponse {
    nodes: Vec<VisNode>,
    edges: Vec<VisEdge>,
    options: serde_json::Value,
}

/// Id of a newly created person
#[derive(Serialize)]
struct CreatedResponse {
    id: String,
}

/// Incoming person fields from the editing panel
///
/// Every field is optional so partial payloads fall back to defaults. The
/// optional `id` lets callers pick their own identifier on creation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonPayload {
    id: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    maiden_name: Option<String>,
    other_names: Option<String>,
    nickname: Option<String>,
    gender: Option<Gender>,
    dob: Option<NaiveDate>,
    dod: Option<NaiveDate>,
    avatar_url: Option<String>,
    married_to: Option<String>,
    divorced_from: Option<String>,
    parents: Vec<String>,
    children: Vec<String>,
}

/// Launch the server and block until it shuts down
///
/// # Errors
/// Returns an error if the listen address cannot be bound or the server
/// fails while running.
pub async fn run(
    tree: FamilyTree,
    data_path: PathBuf,
    host: &str,
    port: u16,
    title: String,
) -> Result<(), Box<dyn Error>> {
    let state = AppState {
        tree: Arc::new(RwLock::new(tree)),
        data_path: Arc::new(data_path),
        title: Arc::new(title),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/graph", get(get_graph))
        .route("/people", get(list_people).post(create_person))
        .route(
            "/people/:id",
            get(get_person).put(update_person).delete(delete_person),
        );

    let app = Router::new()
        .route("/", get(serve_page))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving family tree on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Page and API handlers
// ============================================================================

/// GET / - Serve the interactive family tree page
async fn serve_page(State(state): State<AppState>) -> Html<String> {
    let tree = state.tree.read().await;
    let renderer = HtmlRenderer::editable();

    if let Err(issues) = tree.validate() {
        return Html(renderer.render_error_page(&state.title, &issues));
    }

    let graph = tree.build_graph();
    let levels = match generations::assign_levels(&graph) {
        Ok(levels) => levels,
        Err(e) => return Html(renderer.render_error_page(&state.title, &[e])),
    };

    let ctx = ViewContext::new(&tree, &graph, &levels, &state.title);
    match renderer.render(&ctx) {
        Ok(page) => Html(page),
        Err(e) => {
            error!("Failed to render family tree page: {e}");
            Html(renderer.render_error_page(&state.title, &[e.to_string()]))
        }
    }
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/graph - Translate the current tree into the widget dataset
async fn get_graph(State(state): State<AppState>) -> Response {
    let tree = state.tree.read().await;

    if let Err(issues) = tree.validate() {
        return validation_failure(issues);
    }

    let graph = tree.build_graph();
    let levels = match generations::assign_levels(&graph) {
        Ok(levels) => levels,
        Err(e) => return validation_failure(vec![e]),
    };

    let dataset = graph_data::translate(&tree, &levels);
    let response = GraphResponse {
        nodes: dataset.nodes,
        edges: dataset.edges,
        options: graph_data::widget_options(),
    };
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET /api/people - List everyone, ordered by display name
async fn list_people(State(state): State<AppState>) -> impl IntoResponse {
    let tree = state.tree.read().await;

    let people: Vec<PersonSummary> = tree
        .sorted_ids()
        .into_iter()
        .filter_map(|id| {
            tree.get_person(&id).map(|person| PersonSummary {
                name: person.display_name(),
                id,
            })
        })
        .collect();

    Json(ApiResponse::ok(people))
}

/// GET /api/people/:id - Fetch one person's record
async fn get_person(State(state): State<AppState>, Path(person_id): Path<String>) -> Response {
    let tree = state.tree.read().await;

    tree.get_person(&person_id).map_or_else(
        || not_found(&person_id),
        |person| (StatusCode::OK, Json(ApiResponse::ok(person.clone()))).into_response(),
    )
}

/// POST /api/people - Add a person and persist the updated tree
async fn create_person(
    State(state): State<AppState>,
    Json(payload): Json<PersonPayload>,
) -> Response {
    let person_id = match payload.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let mut guard = state.tree.write().await;
    let mut tree = guard.clone();

    if !tree.add_person(person_id.clone(), Person::default()) {
        return validation_failure(vec![format!(
            "A person with id '{person_id}' already exists"
        )]);
    }
    if let Err(issues) = apply_payload(&mut tree, &person_id, &payload) {
        return validation_failure(issues);
    }
    if let Err(issues) = tree.validate() {
        return validation_failure(issues);
    }
    if let Err(response) = persist(&tree, &state) {
        return response;
    }

    *guard = tree;
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedResponse { id: person_id })),
    )
        .into_response()
}

/// PUT /api/people/:id - Update a person and persist the updated tree
async fn update_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    Json(payload): Json<PersonPayload>,
) -> Response {
    let mut guard = state.tree.write().await;
    let mut tree = guard.clone();

    if !tree.contains(&person_id) {
        return not_found(&person_id);
    }
    if let Err(issues) = apply_payload(&mut tree, &person_id, &payload) {
        return validation_failure(issues);
    }
    if let Err(issues) = tree.validate() {
        return validation_failure(issues);
    }
    if let Err(response) = persist(&tree, &state) {
        return response;
    }

    *guard = tree;
    (StatusCode::OK, Json(ApiResponse::ok(person_id))).into_response()
}

/// DELETE /api/people/:id - Remove a person and every link to them
async fn delete_person(State(state): State<AppState>, Path(person_id): Path<String>) -> Response {
    let mut guard = state.tree.write().await;
    let mut tree = guard.clone();

    if tree.remove_person(&person_id).is_none() {
        return not_found(&person_id);
    }
    if let Err(issues) = tree.validate() {
        return validation_failure(issues);
    }
    if let Err(response) = persist(&tree, &state) {
        return response;
    }

    *guard = tree;
    (StatusCode::OK, Json(ApiResponse::ok(person_id))).into_response()
}

// ============================================================================
// Helpers
// ============================================================================

/// Apply an incoming payload to one person in the tree
///
/// Scalar fields are overwritten first, then relationship fields are routed
/// through the tree so back-links stay mirrored. Collects every routing
/// error instead of stopping at the first.
fn apply_payload(
    tree: &mut FamilyTree,
    person_id: &str,
    payload: &PersonPayload,
) -> Result<(), Vec<String>> {
    let Some(person) = tree.get_person_mut(person_id) else {
        return Err(vec![format!("Unknown person id '{person_id}'")]);
    };

    person.given_name = clean(&payload.given_name);
    person.family_name = clean(&payload.family_name);
    person.maiden_name = clean(&payload.maiden_name);
    person.other_names = clean(&payload.other_names);
    person.nickname = clean(&payload.nickname);
    person.gender = payload.gender.unwrap_or_default();
    person.dob = payload.dob;
    person.dod = payload.dod;
    person.avatar_url = clean(&payload.avatar_url);

    let mut issues = Vec::new();
    if let Err(e) = tree.set_parents(person_id, payload.parents.clone()) {
        issues.push(e);
    }
    if let Err(e) = tree.set_children(person_id, payload.children.clone()) {
        issues.push(e);
    }
    if let Err(e) = tree.set_spouse(person_id, payload.married_to.clone()) {
        issues.push(e);
    }
    if let Err(e) = tree.set_former_spouse(person_id, payload.divorced_from.clone()) {
        issues.push(e);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Normalize an optional string field, treating blank values as absent
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Write the tree to disk, turning failures into a 500 response
fn persist(tree: &FamilyTree, state: &AppState) -> Result<(), Response> {
    store::save_family_file(state.data_path.as_ref(), tree).map_err(|e| {
        error!("Failed to save family file: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::err(format!(
                "Failed to save family file: {e}"
            ))),
        )
            .into_response()
    })
}

/// Build the 422 response for a failed validation pass
fn validation_failure(issues: Vec<String>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::<()>::err(issues.join("; "))),
    )
        .into_response()
}

/// Build the 404 response for an unknown person id
fn not_found(person_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err(format!(
            "Unknown person id '{person_id}'"
        ))),
    )
        .into_response()
}

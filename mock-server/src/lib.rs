//! In-memory tasks backend speaking the same contract as the real service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const MAX_MESSAGE_LEN: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub message: String,
    pub completed: bool,
    pub favorite: bool,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub message: String,
}

#[derive(Deserialize)]
pub struct TaskPatch {
    pub id: String,
    pub message: Option<String>,
    pub completed: Option<bool>,
    pub favorite: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Newest first.
pub type Db = Arc<RwLock<Vec<Task>>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task).put(update_tasks))
        .route("/tasks/{id}", delete(remove_task))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "tasks backend listening");
    }
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(token) if token == &*state.token => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn valid_message(message: &str) -> bool {
    !message.is_empty() && message.chars().count() <= MAX_MESSAGE_LEN
}

async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Task>>>, StatusCode> {
    authorize(&state, &headers)?;
    let tasks = state.db.read().await;
    Ok(Json(Envelope { data: tasks.clone() }))
}

async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateTask>,
) -> Result<Json<Envelope<Task>>, StatusCode> {
    authorize(&state, &headers)?;
    if !valid_message(&input.message) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let task = Task {
        id: Uuid::new_v4().to_string(),
        message: input.message,
        completed: false,
        favorite: false,
    };
    debug!(id = %task.id, "task created");
    state.db.write().await.insert(0, task.clone());
    Ok(Json(Envelope { data: task }))
}

/// Applies the whole batch or nothing: every id must exist.
async fn update_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patches): Json<Vec<TaskPatch>>,
) -> Result<Json<Envelope<Vec<Task>>>, StatusCode> {
    authorize(&state, &headers)?;
    let mut tasks = state.db.write().await;
    if patches.iter().any(|patch| !tasks.iter().any(|task| task.id == patch.id)) {
        return Err(StatusCode::NOT_FOUND);
    }
    if patches
        .iter()
        .any(|patch| patch.message.as_deref().is_some_and(|m| !valid_message(m)))
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut updated = Vec::with_capacity(patches.len());
    for patch in patches {
        if let Some(task) = tasks.iter_mut().find(|task| task.id == patch.id) {
            if let Some(message) = patch.message {
                task.message = message;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            if let Some(favorite) = patch.favorite {
                task.favorite = favorite;
            }
            updated.push(task.clone());
        }
    }
    Ok(Json(Envelope { data: updated }))
}

async fn remove_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorize(&state, &headers)?;
    let mut tasks = state.db.write().await;
    let before = tasks.len();
    tasks.retain(|task| task.id != id);
    if tasks.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

//! In-process fake of the notes HTTP API.

// Allow dead code since not every test binary uses every knob
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

const TIMESTAMP: &str = "2024-01-15T10:30:00Z";

/// A note as the fake server stores and returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct DraftBody {
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
}

#[derive(Debug, Deserialize)]
struct SuggestBody {
    content: String,
}

#[derive(Debug, Deserialize)]
struct AskBody {
    question: String,
}

#[derive(Debug, Default)]
struct ApiState {
    notes: Vec<StoredNote>,
    next_id: i64,
    suggestions: Vec<String>,
    answer: String,
    fail_with: Option<u16>,
    malformed: bool,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<ApiState>>;

/// A running fake API. Dropping this signals the server to stop.
pub struct FakeApi {
    addr: SocketAddr,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeApi {
    /// Starts the server on an ephemeral local port.
    ///
    /// The server gets its own thread and runtime, so this works from both
    /// plain and `#[tokio::test]` tests.
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ApiState {
            next_id: 1,
            answer: "No answer configured".to_string(),
            ..Default::default()
        }));
        let app = router(Arc::clone(&state));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("Failed to build fake API runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind fake API");
                addr_tx
                    .send(listener.local_addr().expect("No local addr"))
                    .expect("Test dropped before server started");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("Fake API failed");
            });
        });

        let addr = addr_rx.recv().expect("Fake API did not start");
        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Base URL to hand to the client, e.g. `http://127.0.0.1:PORT/api`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    fn lock(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().expect("Fake API state poisoned")
    }

    /// Stores a note as if created earlier and returns its id.
    pub fn seed(&self, title: &str, content: &str) -> i64 {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.notes.push(StoredNote {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: TIMESTAMP.to_string(),
            updated_at: TIMESTAMP.to_string(),
        });
        id
    }

    pub fn notes(&self) -> Vec<StoredNote> {
        self.lock().notes.clone()
    }

    pub fn set_suggestions<I, S>(&self, suggestions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().suggestions = suggestions.into_iter().map(Into::into).collect();
    }

    pub fn set_answer(&self, answer: &str) {
        self.lock().answer = answer.to_string();
    }

    /// Makes every subsequent request fail with `status`.
    pub fn fail_with(&self, status: u16) {
        self.lock().fail_with = Some(status);
    }

    /// Makes every subsequent request succeed with a body that is not JSON.
    pub fn serve_malformed(&self) {
        self.lock().malformed = true;
    }

    /// Requests received so far, as `METHOD /path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A URL nothing listens on.
pub fn dead_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    drop(listener);
    format!("http://{}/api", addr)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/notes/", get(list_notes).post(create_note))
        .route("/api/notes/search/", get(search_notes))
        .route(
            "/api/notes/{id}/",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/ai/suggestions/", post(suggest))
        .route("/api/ai/ask/", post(ask))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            record_and_inject,
        ))
        .with_state(state)
}

async fn record_and_inject(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let (fail_with, malformed) = {
        let mut state = state.lock().expect("Fake API state poisoned");
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        state.requests.push(format!("{} {}", req.method(), target));
        (state.fail_with, state.malformed)
    };

    if let Some(status) = fail_with {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "injected failure").into_response();
    }
    if malformed {
        return (StatusCode::OK, "{not json").into_response();
    }
    next.run(req).await
}

async fn list_notes(State(state): State<Shared>) -> Json<Vec<StoredNote>> {
    Json(state.lock().expect("poisoned").notes.clone())
}

async fn get_note(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().expect("poisoned");
    match state.notes.iter().find(|n| n.id == id) {
        Some(note) => Json(note.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn create_note(State(state): State<Shared>, Json(body): Json<DraftBody>) -> Response {
    if body.title.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "title is required").into_response();
    }
    let mut state = state.lock().expect("poisoned");
    let id = state.next_id;
    state.next_id += 1;
    let note = StoredNote {
        id,
        title: body.title,
        content: body.content,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    state.notes.push(note.clone());
    (StatusCode::CREATED, Json(note)).into_response()
}

async fn update_note(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<DraftBody>,
) -> Response {
    let mut state = state.lock().expect("poisoned");
    match state.notes.iter_mut().find(|n| n.id == id) {
        Some(note) => {
            // Mimics a server that normalizes titles.
            note.title = body.title.trim().to_string();
            note.content = body.content;
            note.updated_at = "2024-02-01T08:00:00Z".to_string();
            Json(note.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn delete_note(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().expect("poisoned");
    let before = state.notes.len();
    state.notes.retain(|n| n.id != id);
    if state.notes.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn search_notes(
    State(state): State<Shared>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<serde_json::Value>> {
    let state = state.lock().expect("poisoned");
    let needle = params.q.to_lowercase();
    let hits = state
        .notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
        })
        .enumerate()
        .map(|(rank, note)| {
            let mut value = serde_json::to_value(note).expect("note serializes");
            value["score"] = serde_json::json!(0.9 - rank as f64 * 0.1);
            value
        })
        .collect();
    Json(hits)
}

async fn suggest(State(state): State<Shared>, Json(body): Json<SuggestBody>) -> Response {
    let state = state.lock().expect("poisoned");
    if body.content.is_empty() {
        return (StatusCode::BAD_REQUEST, "content is required").into_response();
    }
    Json(serde_json::json!({ "suggestions": state.suggestions })).into_response()
}

async fn ask(State(state): State<Shared>, Json(body): Json<AskBody>) -> Response {
    let state = state.lock().expect("poisoned");
    if body.question.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "question is required").into_response();
    }
    Json(serde_json::json!({ "answer": state.answer })).into_response()
}

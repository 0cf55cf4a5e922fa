//! `RemoteStore` trait and its HTTP implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::error::{RemoteError, RemoteResult};
use super::wire::{AnswerResponse, AskRequest, SuggestionsRequest, SuggestionsResponse};
use crate::domain::{Note, NoteDraft, NoteId, SearchHit};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// The remote note store and its AI endpoints.
///
/// One method per remote operation. Implementations do not retry, cache or
/// impose timeouts of their own: a failure goes straight back to the caller.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `GET /notes/`
    async fn list_notes(&self) -> RemoteResult<Vec<Note>>;

    /// `GET /notes/{id}/`
    async fn get_note(&self, id: NoteId) -> RemoteResult<Note>;

    /// `POST /notes/`
    async fn create_note(&self, draft: &NoteDraft) -> RemoteResult<Note>;

    /// `PUT /notes/{id}/`
    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RemoteResult<Note>;

    /// `DELETE /notes/{id}/`
    async fn delete_note(&self, id: NoteId) -> RemoteResult<()>;

    /// `GET /notes/search/?q={query}`
    async fn search_notes(&self, query: &str) -> RemoteResult<Vec<SearchHit>>;

    /// `POST /ai/suggestions/`
    async fn get_suggestions(&self, content: &str) -> RemoteResult<SuggestionsResponse>;

    /// `POST /ai/ask/`
    async fn ask_question(&self, question: &str) -> RemoteResult<AnswerResponse>;
}

/// `RemoteStore` over the JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    http: Client,
    base_url: Url,
}

impl HttpRemoteStore {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    ///
    /// A trailing slash is added if missing so endpoint paths join beneath
    /// the base instead of replacing its last segment.
    pub fn new(base_url: &str) -> RemoteResult<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let parsed = Url::parse(&normalized).map_err(|e| RemoteError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let http = Client::builder()
            .user_agent(concat!("ainotes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> RemoteResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    fn note_endpoint(&self, id: NoteId) -> RemoteResult<Url> {
        self.endpoint(&format!("notes/{}/", id))
    }

    async fn execute(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let res = request.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let res = self.execute(request).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn log_failure(operation: &str, err: &RemoteError) {
    error!(
        operation,
        transport = err.is_transport(),
        "remote call failed: {err}"
    );
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_notes(&self) -> RemoteResult<Vec<Note>> {
        let url = self.endpoint("notes/")?;
        debug!(%url, "listing notes");
        self.fetch_json(self.http.get(url))
            .await
            .inspect_err(|e| log_failure("list notes", e))
    }

    async fn get_note(&self, id: NoteId) -> RemoteResult<Note> {
        let url = self.note_endpoint(id)?;
        debug!(%url, "fetching note");
        self.fetch_json(self.http.get(url))
            .await
            .inspect_err(|e| log_failure("get note", e))
    }

    async fn create_note(&self, draft: &NoteDraft) -> RemoteResult<Note> {
        let url = self.endpoint("notes/")?;
        debug!(%url, title = %draft.title, "creating note");
        self.fetch_json(self.http.post(url).json(draft))
            .await
            .inspect_err(|e| log_failure("create note", e))
    }

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RemoteResult<Note> {
        let url = self.note_endpoint(id)?;
        debug!(%url, "updating note");
        self.fetch_json(self.http.put(url).json(draft))
            .await
            .inspect_err(|e| log_failure("update note", e))
    }

    async fn delete_note(&self, id: NoteId) -> RemoteResult<()> {
        let url = self.note_endpoint(id)?;
        debug!(%url, "deleting note");
        self.execute(self.http.delete(url))
            .await
            .map(|_| ())
            .inspect_err(|e| log_failure("delete note", e))
    }

    async fn search_notes(&self, query: &str) -> RemoteResult<Vec<SearchHit>> {
        let mut url = self.endpoint("notes/search/")?;
        url.query_pairs_mut().append_pair("q", query);
        debug!(%url, "searching notes");
        self.fetch_json(self.http.get(url))
            .await
            .inspect_err(|e| log_failure("search notes", e))
    }

    async fn get_suggestions(&self, content: &str) -> RemoteResult<SuggestionsResponse> {
        let url = self.endpoint("ai/suggestions/")?;
        debug!(%url, chars = content.chars().count(), "requesting suggestions");
        self.fetch_json(self.http.post(url).json(&SuggestionsRequest { content }))
            .await
            .inspect_err(|e| log_failure("get suggestions", e))
    }

    async fn ask_question(&self, question: &str) -> RemoteResult<AnswerResponse> {
        let url = self.endpoint("ai/ask/")?;
        debug!(%url, "asking question");
        self.fetch_json(self.http.post(url).json(&AskRequest { question }))
            .await
            .inspect_err(|e| log_failure("ask question", e))
    }
}

//! Scripted in-memory `RemoteStore` for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Semaphore, watch};

use super::{AnswerResponse, RemoteError, RemoteResult, RemoteStore, SuggestionsResponse};
use crate::domain::{Note, NoteDraft, NoteId, SearchHit};
use crate::store::AppState;

/// A call the scripted remote received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List,
    Get(NoteId),
    Create(NoteDraft),
    Update(NoteId, NoteDraft),
    Delete(NoteId),
    Search(String),
    Suggest(String),
    Ask(String),
}

/// Answers each operation from its own queue of canned results.
///
/// An operation called with an empty queue panics, so tests fail loudly on
/// unexpected traffic. `hold()` parks every call until the test releases it,
/// and `observe()` records the container's `loading` flag as seen from
/// inside each call.
#[derive(Default)]
pub(crate) struct ScriptedRemote {
    list: Mutex<VecDeque<RemoteResult<Vec<Note>>>>,
    get: Mutex<VecDeque<RemoteResult<Note>>>,
    create: Mutex<VecDeque<RemoteResult<Note>>>,
    update: Mutex<VecDeque<RemoteResult<Note>>>,
    delete: Mutex<VecDeque<RemoteResult<()>>>,
    search: Mutex<VecDeque<RemoteResult<Vec<SearchHit>>>>,
    suggest: Mutex<VecDeque<RemoteResult<SuggestionsResponse>>>,
    ask: Mutex<VecDeque<RemoteResult<AnswerResponse>>>,
    calls: Mutex<Vec<Call>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
    probe: Mutex<Option<watch::Receiver<AppState>>>,
    loading_seen: Mutex<Vec<bool>>,
}

pub(crate) fn transport_error() -> RemoteError {
    RemoteError::Transport("connection refused".to_string())
}

pub(crate) fn note(id: i64, title: &str, content: &str) -> Note {
    Note::new(NoteId::from_raw(id), title, content)
}

fn pop<T>(queue: &Mutex<VecDeque<RemoteResult<T>>>, op: &str) -> RemoteResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected {op} call: nothing scripted"))
}

impl ScriptedRemote {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn on_list(&self, result: RemoteResult<Vec<Note>>) -> &Self {
        self.list.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_get(&self, result: RemoteResult<Note>) -> &Self {
        self.get.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_create(&self, result: RemoteResult<Note>) -> &Self {
        self.create.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_update(&self, result: RemoteResult<Note>) -> &Self {
        self.update.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_delete(&self, result: RemoteResult<()>) -> &Self {
        self.delete.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_search(&self, result: RemoteResult<Vec<SearchHit>>) -> &Self {
        self.search.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_suggest(&self, result: RemoteResult<SuggestionsResponse>) -> &Self {
        self.suggest.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_ask(&self, result: RemoteResult<AnswerResponse>) -> &Self {
        self.ask.lock().unwrap().push_back(result);
        self
    }

    /// Parks every subsequent call until a permit is added to the returned gate.
    pub(crate) fn hold(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Records the `loading` flag of `rx` each time a call arrives.
    pub(crate) fn observe(&self, rx: watch::Receiver<AppState>) {
        *self.probe.lock().unwrap() = Some(rx);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(rx) = self.probe.lock().unwrap().as_ref() {
            self.loading_seen.lock().unwrap().push(rx.borrow().loading);
        }
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

#[async_trait]
impl RemoteStore for ScriptedRemote {
    async fn list_notes(&self) -> RemoteResult<Vec<Note>> {
        self.enter(Call::List).await;
        pop(&self.list, "list_notes")
    }

    async fn get_note(&self, id: NoteId) -> RemoteResult<Note> {
        self.enter(Call::Get(id)).await;
        pop(&self.get, "get_note")
    }

    async fn create_note(&self, draft: &NoteDraft) -> RemoteResult<Note> {
        self.enter(Call::Create(draft.clone())).await;
        pop(&self.create, "create_note")
    }

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RemoteResult<Note> {
        self.enter(Call::Update(id, draft.clone())).await;
        pop(&self.update, "update_note")
    }

    async fn delete_note(&self, id: NoteId) -> RemoteResult<()> {
        self.enter(Call::Delete(id)).await;
        pop(&self.delete, "delete_note")
    }

    async fn search_notes(&self, query: &str) -> RemoteResult<Vec<SearchHit>> {
        self.enter(Call::Search(query.to_string())).await;
        pop(&self.search, "search_notes")
    }

    async fn get_suggestions(&self, content: &str) -> RemoteResult<SuggestionsResponse> {
        self.enter(Call::Suggest(content.to_string())).await;
        pop(&self.suggest, "get_suggestions")
    }

    async fn ask_question(&self, question: &str) -> RemoteResult<AnswerResponse> {
        self.enter(Call::Ask(question.to_string())).await;
        pop(&self.ask, "ask_question")
    }
}

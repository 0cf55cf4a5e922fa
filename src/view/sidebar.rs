//! Sidebar: recent notes and the ask-your-notes panel.

use std::fmt::Write;

use tracing::warn;

use crate::remote::RemoteStore;
use crate::store::AppState;

const RECENT_LIMIT: usize = 5;

/// Answer shown when the ask endpoint fails.
pub const ASK_FAILURE: &str = "Sorry, I could not answer that question. Please try again.";

/// The first few notes of the collection, as quick links.
pub struct RecentNotes;

impl RecentNotes {
    pub fn render(state: &AppState) -> String {
        let mut out = String::from("Recent Notes\n");
        let recent = state.recent(RECENT_LIMIT);
        if recent.is_empty() {
            out.push_str("  No notes yet\n");
        }
        for note in recent {
            let _ = writeln!(out, "  [{}] {}", note.id(), note.title());
        }
        out
    }
}

/// Free-form question against the whole note collection.
#[derive(Debug, Default)]
pub struct AskPanel {
    question: String,
    answer: Option<String>,
    loading: bool,
}

impl AskPanel {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Asks the current question. Returns false if it was blank.
    ///
    /// A failure is not an error for the caller: it becomes the panel's
    /// apology answer.
    pub async fn ask(&mut self, remote: &dyn RemoteStore) -> bool {
        if self.question.trim().is_empty() {
            return false;
        }

        self.loading = true;
        let answer = match remote.ask_question(&self.question).await {
            Ok(response) => response.answer,
            Err(err) => {
                warn!("ask failed: {err}");
                ASK_FAILURE.to_string()
            }
        };
        self.loading = false;
        self.answer = Some(answer);
        true
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Ask about your notes\n");
        if !self.question.is_empty() {
            let _ = writeln!(out, "  Q: {}", self.question);
        }
        if self.loading {
            out.push_str("  Thinking...\n");
        } else if let Some(answer) = &self.answer {
            let _ = writeln!(out, "  A: {}", answer);
        }
        out
    }
}

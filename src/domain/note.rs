//! Note, draft and search-hit types exchanged with the remote store.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of error that occurred when validating a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftErrorKind {
    EmptyTitle,
}

/// Error returned when a draft is not fit for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftError {
    kind: DraftErrorKind,
}

impl DraftError {
    /// Returns true if the draft was rejected for having no title.
    pub fn is_empty_title(&self) -> bool {
        self.kind == DraftErrorKind::EmptyTitle
    }
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DraftErrorKind::EmptyTitle => write!(f, "Please enter a title for your note"),
        }
    }
}

impl std::error::Error for DraftError {}

/// A note as held by the remote store.
///
/// Every field except `content` is owned by the server: the id and both
/// timestamps are assigned there, and the title the server returns wins over
/// whatever the client submitted. Instances are built by deserializing server
/// responses; the constructors exist for fakes and tests.
///
/// # Examples
///
/// ```
/// use ainotes::domain::{Note, NoteId};
///
/// let note = Note::new(NoteId::from_raw(1), "Groceries", "milk, eggs");
/// assert_eq!(note.title(), "Groceries");
/// assert!(note.updated_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Creates a note without timestamps.
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the server-side timestamps.
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = updated_at;
        self
    }

    /// Returns the server-assigned identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the server created the note, if reported.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns when the server last modified the note, if reported.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Most recent known timestamp: modification time, else creation time.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    /// Returns the note's fields as a draft, for pre-filling an editor.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft::new(&self.title, &self.content)
    }
}

/// Client-side input for creating or replacing a note.
///
/// This is the only shape ever sent to the store's create and update
/// endpoints: `{"title": ..., "content": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` if the title is empty or whitespace-only. The
    /// title itself is sent as typed; the server is authoritative on
    /// normalization.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError {
                kind: DraftErrorKind::EmptyTitle,
            });
        }
        Ok(())
    }
}

/// A search result: a note plus the ranking score the server attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    note: Note,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

impl SearchHit {
    pub fn new(note: Note, score: Option<f64>) -> Self {
        Self { note, score }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Relevance in `[0, 1]`, when the server ranked this hit.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Score as a whole percentage, or `None` when absent or zero.
    pub fn relevance_percent(&self) -> Option<u32> {
        match self.score {
            Some(score) if score > 0.0 => Some((score * 100.0).round() as u32),
            _ => None,
        }
    }
}

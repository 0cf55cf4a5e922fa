//! Request and response bodies of the AI endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /ai/suggestions/`.
#[derive(Debug, Serialize)]
pub(crate) struct SuggestionsRequest<'a> {
    pub content: &'a str,
}

/// Response of `POST /ai/suggestions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// Body of `POST /ai/ask/`.
#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub question: &'a str,
}

/// Response of `POST /ai/ask/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

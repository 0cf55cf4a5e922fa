//! The four navigable locations and the session's navigation history.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::NoteId;

/// A location the user can be at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: the note list.
    Home,
    /// `/note/{id}`: the editor for an existing note.
    Note(NoteId),
    /// `/new`: the editor for a fresh note.
    New,
    /// `/search`: results of the last search.
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRouteError {
    #[error("unknown location: {0}")]
    Unknown(String),
    #[error("invalid note id in location '{path}': {reason}")]
    BadId { path: String, reason: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Note(id) => write!(f, "/note/{}", id),
            Route::New => write!(f, "/new"),
            Route::Search => write!(f, "/search"),
        }
    }
}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(""), None, None) => Ok(Route::Home),
            (Some("new"), None, None) => Ok(Route::New),
            (Some("search"), None, None) => Ok(Route::Search),
            (Some("note"), Some(raw), None) => raw
                .parse::<NoteId>()
                .map(Route::Note)
                .map_err(|e| ParseRouteError::BadId {
                    path: s.to_string(),
                    reason: e.to_string(),
                }),
            _ => Err(ParseRouteError::Unknown(s.to_string())),
        }
    }
}

/// Tracks where the session is and how it got there.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    /// Starts at home.
    pub fn new() -> Self {
        Self::at(Route::Home)
    }

    pub fn at(route: Route) -> Self {
        Self {
            history: vec![route],
        }
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.current(), to = %route, "navigate");
        self.history.push(route);
    }

    pub fn current(&self) -> &Route {
        // history always holds the starting route
        self.history.last().unwrap_or(&Route::Home)
    }

    /// Every location visited, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

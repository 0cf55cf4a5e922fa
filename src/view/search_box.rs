//! Global search box in the header.

use crate::remote::RemoteResult;
use crate::router::{Navigator, Route};
use crate::store::NotesStore;

/// Query input that runs a search and jumps to the results.
#[derive(Debug, Default)]
pub struct SearchBox {
    query: String,
}

impl SearchBox {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Runs the search and navigates to the results.
    ///
    /// Returns `Ok(false)` without issuing a request when the query is blank.
    /// A failed search leaves the location unchanged.
    pub async fn submit(&self, store: &NotesStore, nav: &mut Navigator) -> RemoteResult<bool> {
        if self.query.trim().is_empty() {
            return Ok(false);
        }
        store.search(&self.query).await?;
        nav.navigate(Route::Search);
        Ok(true)
    }
}

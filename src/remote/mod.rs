//! Client for the remote note store and its AI endpoints

mod client;
mod error;
#[cfg(test)]
pub(crate) mod scripted;
mod wire;

pub use client::{DEFAULT_API_URL, HttpRemoteStore, RemoteStore};
pub use error::{RemoteError, RemoteResult};
pub use wire::{AnswerResponse, SuggestionsResponse};

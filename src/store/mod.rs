//! Notes state container and its change observer

mod container;
mod observer;
mod state;


pub use container::NotesStore;
pub use observer::log_transitions;
pub use state::{AppState, Operation};

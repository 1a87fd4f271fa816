//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod store;

pub use store::{DispatchOutcome, TournamentStore};

//! Shared types for the tournament voting system
//!
//! Contains the identifiers, the pure tournament engine and the action records
//! that every component agrees on. Browser-facing transport messages are kept in
//! the webserver component.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod tournament;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::Action;
pub use tournament::{Snapshot, VoteRound};

//! Message types for the tournament voting system
//!
//! - `action`: tagged action records sent by voting clients and admins

pub mod action;

pub use action::Action;

//! Core use-case services.
//!
//! # Responsibility
//! - Own the task backlog and grid generation use-cases.
//! - Keep UI/FFI layers decoupled from collection details.

pub mod bingo_manager;
pub mod board;
pub mod events;
pub mod shared;

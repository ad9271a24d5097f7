//! Domain model for the task backlog and its container projections.
//!
//! # Responsibility
//! - Define the task record and the completable container shapes.
//! - Keep grid layout rules (row-major, N x N) in one place.
//!
//! # Invariants
//! - Every task carries a stable backlog-scoped `TaskId`.
//! - Containers only mutate completion state, never identity or text.

pub mod container;
pub mod grid;
pub mod task;

//! Flutter-facing bridge over `bingo_core`.

pub mod api;

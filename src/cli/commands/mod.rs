//! CLI command implementations.

pub mod check;
pub mod send;
pub mod show;

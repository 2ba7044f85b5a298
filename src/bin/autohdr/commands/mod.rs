//! Command implementations

pub mod completions;
pub mod resolve;
pub mod restrict;
pub mod wrap;

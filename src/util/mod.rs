//! Shared utilities

pub mod args;
pub mod config;
pub mod diagnostic;
pub mod fs;

pub use config::ResolveManifest;
pub use diagnostic::Diagnostic;

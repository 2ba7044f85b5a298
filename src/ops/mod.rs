//! High-level operations.
//!
//! This module contains the implementation of autohdr commands.

pub mod resolve_header;
pub mod restrict;
pub mod wrap_source;

pub use resolve_header::{render_header, resolve_header, ResolveOptions};
pub use restrict::{resolve_restrict, select_restrict, FallbackOutcome, RestrictOptions};
pub use wrap_source::{wrap_sources, SourceMapping, WrapOptions};

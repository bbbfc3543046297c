//! Migration framework
//!
//! - runner with SHA-256 checksums recorded in `schema_version`
//! - idempotent application; a changed migration is reported, never re-run
//! - SQL embedded at compile time

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};

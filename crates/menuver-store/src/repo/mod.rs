//! Repository layer between the core model and SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use hydration::{load_live_tree, load_version_tree};
pub use sqlite_repo::SqliteRepo;

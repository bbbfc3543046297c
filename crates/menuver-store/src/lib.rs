//! menuver store - SQLite persistence for menu trees and versions
//!
//! Provides:
//! - connection setup (`db`)
//! - embedded schema migrations with checksums
//! - a repository over live nodes, version nodes and versions
//! - hydration of stored rows into `MenuTree`s

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteRepo;

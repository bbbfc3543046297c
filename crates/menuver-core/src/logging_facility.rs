//! Structured logging facility for menuver
//!
//! - one initialization point, `init(profile)`
//! - operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - an in-memory capture layer for asserting emitted events in tests
//!
//! # Usage
//!
//! ```rust
//! use menuver_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Field and event names come from `menuver_core_types::schema`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

//! Command orchestration layer.
//!
//! Each command opens an `IMMEDIATE` transaction, hydrates what it needs,
//! applies core logic, writes back and commits. The write lock is taken
//! before the first read, so invariant checks see a state no other writer
//! can change underneath them. `publish` splits into two such transactions
//! so the lock is not held across the remote call.

#![allow(clippy::result_large_err)]

pub mod node;
pub mod publish;
pub mod version;

use std::time::Instant;

use menuver_core::errors::ExError;
use menuver_core::{log_op_end, log_op_error, log_op_start};
use menuver_core_types::RequestContext;
use menuver_store::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Which tree a command works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    /// The live tree of an account
    Live { account_id: String },
    /// The tree of a version; edits require the version to be Draft
    Version { version_id: String },
}

impl MenuTarget {
    pub fn live(account_id: impl Into<String>) -> Self {
        MenuTarget::Live {
            account_id: account_id.into(),
        }
    }

    pub fn version(version_id: impl Into<String>) -> Self {
        MenuTarget::Version {
            version_id: version_id.into(),
        }
    }

    pub(crate) fn subject(&self) -> Subject<'_> {
        match self {
            MenuTarget::Live { account_id } => Subject::Account(account_id),
            MenuTarget::Version { version_id } => Subject::Version(version_id),
        }
    }
}

impl std::fmt::Display for MenuTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuTarget::Live { account_id } => write!(f, "live:{}", account_id),
            MenuTarget::Version { version_id } => write!(f, "version:{}", version_id),
        }
    }
}

/// Entity a log line is about
#[derive(Debug, Clone, Copy)]
pub(crate) enum Subject<'a> {
    Account(&'a str),
    Version(&'a str),
}

/// Begin a transaction that holds the write lock from its first statement
pub(crate) fn begin_immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}

/// Run a command between start/end log events, tagging errors with the
/// operation name and request id
pub(crate) fn instrumented<T>(
    op: &'static str,
    ctx: &RequestContext,
    subject: Subject<'_>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let start = Instant::now();
    let request_id = ctx.request_id.as_str();

    match subject {
        Subject::Account(account_id) => {
            log_op_start!(op, request_id, account_id);
        }
        Subject::Version(version_id) => {
            log_op_start!(op, request_id, version_id);
        }
    }

    let result = f().map_err(|err| tag_error(err, op, ctx));
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms, request_id);
        }
        Err(err) => {
            log_op_error!(op, err, duration_ms = duration_ms, request_id);
        }
    }

    result
}

fn tag_error(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let err = if err.op().is_none() { err.with_op(op) } else { err };
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

//! Remote publish seam
//!
//! The publish pipeline hands the rendered menu document to a
//! [`RemotePublisher`]. Transport, credentials and timeouts belong to the
//! implementation; any failure is reported as an `ExError` and the pipeline
//! wraps it as `RemotePublish`.

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

use crate::errors::ExError;
#[cfg(any(test, feature = "testing"))]
use crate::errors::ExErrorKind;

/// Sends a rendered menu document to the remote platform.
pub trait RemotePublisher: Send + Sync {
    /// Publish `menu_json` as the active menu of `account_id`.
    ///
    /// # Errors
    ///
    /// Any error; the caller treats every failure the same way.
    #[allow(clippy::result_large_err)]
    fn publish(&self, account_id: &str, menu_json: &str) -> std::result::Result<(), ExError>;
}

/// Accepts every document without sending it (CLI default).
pub struct NoopRemotePublisher;

impl RemotePublisher for NoopRemotePublisher {
    #[allow(clippy::result_large_err)]
    fn publish(&self, _: &str, _: &str) -> std::result::Result<(), ExError> {
        Ok(())
    }
}

/// Always fails (for tests that verify a failed remote call leaves the
/// version unpublished).
#[cfg(any(test, feature = "testing"))]
pub struct RejectingRemotePublisher;

#[cfg(any(test, feature = "testing"))]
impl RemotePublisher for RejectingRemotePublisher {
    #[allow(clippy::result_large_err)]
    fn publish(&self, account_id: &str, _: &str) -> std::result::Result<(), ExError> {
        Err(ExError::new(ExErrorKind::Io)
            .with_op("remote_publish")
            .with_entity_id(account_id)
            .with_message("remote platform rejected the menu"))
    }
}

/// Accepts every document and keeps a copy of each call.
#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
pub struct RecordingRemotePublisher {
    calls: Mutex<Vec<(String, String)>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingRemotePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(account_id, menu_json)` pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl RemotePublisher for RecordingRemotePublisher {
    #[allow(clippy::result_large_err)]
    fn publish(&self, account_id: &str, menu_json: &str) -> std::result::Result<(), ExError> {
        let mut calls = self.calls.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("remote_publish")
                .with_message("publisher lock poisoned")
        })?;
        calls.push((account_id.to_string(), menu_json.to_string()));
        Ok(())
    }
}

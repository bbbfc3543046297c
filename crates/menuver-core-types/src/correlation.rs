//! Correlation ids and the per-call request context
//!
//! One `RequestContext` is built per engine call. Its ids tag every log event
//! and error the call produces; `actor` is who made the call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered id (UUID v7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Id of one engine call
    RequestId
);

correlation_id!(
    /// Id shared by calls belonging to one upstream trace
    TraceId
);

/// Who is calling, and the ids that tie its logs and errors together
///
/// `actor` is recorded on versions as `published_by`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
    pub actor: String,
}

impl RequestContext {
    /// Context for `actor` with a fresh request id and no trace
    pub fn for_actor(actor: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: None,
            actor: actor.into(),
        }
    }

    /// Reuse a request id handed in by the caller
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
        assert_ne!(TraceId::new(), TraceId::new());
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = RequestId::from("req-42");
        assert_eq!(id.to_string(), "req-42");
        assert_eq!(id.as_str(), "req-42");
    }

    #[test]
    fn test_context_builders() {
        let ctx = RequestContext::for_actor("ops@example.com")
            .with_request_id(RequestId::from("req-1"))
            .with_trace_id(TraceId::from("trace-1"));

        assert_eq!(ctx.actor, "ops@example.com");
        assert_eq!(ctx.request_id.as_str(), "req-1");
        assert_eq!(ctx.trace_id.as_ref().map(TraceId::as_str), Some("trace-1"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = TraceId::from("trace-9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"trace-9\"");
        let back: TraceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

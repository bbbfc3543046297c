use menuver_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using MenuError
pub type Result<T> = std::result::Result<T, MenuError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (CLI, API layers, tests)
/// can match on without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    StructureLimit,
    StructureInvalid,
    CycleDetected,
    HasChildren,

    // Version lifecycle
    NotDraft,
    InvalidRollbackTarget,
    InvalidTransition,

    // Remote publish
    RemotePublish,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::StructureLimit => "ERR_STRUCTURE_LIMIT",
            ExErrorKind::StructureInvalid => "ERR_STRUCTURE_INVALID",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::HasChildren => "ERR_HAS_CHILDREN",
            ExErrorKind::NotDraft => "ERR_NOT_DRAFT",
            ExErrorKind::InvalidRollbackTarget => "ERR_INVALID_ROLLBACK_TARGET",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::RemotePublish => "ERR_REMOTE_PUBLISH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus context
/// fields for debugging. A wrapped `source` keeps the original cause when an
/// error is re-classified (the publish pipeline wraps remote failures).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    version_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    violations: Vec<String>,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            version_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (node or account)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add version ID context
    pub fn with_version_id(mut self, id: impl Into<String>) -> Self {
        self.version_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach structural violations (StructureInvalid)
    pub fn with_violations(mut self, violations: Vec<String>) -> Self {
        self.violations = violations;
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the version ID context, if any
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structural violations (empty unless StructureInvalid)
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(version_id) = &self.version_id {
            write!(f, " (version_id: {})", version_id)?;
        }
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        if let Some(source) = &self.source {
            write!(f, "\n  caused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for tree and version operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    // ===== Tree Errors =====
    /// Node not found in the tree
    #[error("Menu node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Parent node not found in the tree
    #[error("Parent menu node not found: {node_id}")]
    ParentNotFound { node_id: String },

    /// A single mutation would exceed a fanout or depth limit
    #[error("Structure limit exceeded: {reason}")]
    StructureLimit { reason: String },

    /// Full-tree validation failed
    #[error("Menu structure is invalid ({} violation(s))", .violations.len())]
    StructureInvalid { violations: Vec<String> },

    /// Move would make a node its own ancestor
    #[error("Cycle detected: cannot move node {node_id} under {new_parent_id}")]
    Cycle {
        node_id: String,
        new_parent_id: String,
    },

    /// Delete attempted on a node that still has children
    #[error("Cannot remove node {node_id}: it has {child_count} child node(s)")]
    HasChildren { node_id: String, child_count: usize },

    /// Node id already present in the tree
    #[error("Menu node already exists: {node_id}")]
    DuplicateNode { node_id: String },

    /// Name is empty or whitespace-only
    #[error("Invalid menu name: {reason}")]
    InvalidName { reason: String },

    /// Reorder request does not match the current sibling set
    #[error("Reorder ids do not match the children of {parent}")]
    SiblingSetMismatch { parent: String },

    // ===== Version Errors =====
    /// Operation requires a Draft version
    #[error("Version {version_id} is {status}, expected draft")]
    NotDraft { version_id: String, status: String },

    /// Rollback requested against a Draft version
    #[error("Cannot roll back to draft version {version_id}")]
    InvalidRollbackTarget { version_id: String },

    /// Transition not present in the lifecycle table
    #[error("Version {version_id} cannot {transition} from {status}")]
    InvalidTransition {
        version_id: String,
        status: String,
        transition: String,
    },

    // ===== Serialization =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from MenuError to ExError
impl From<MenuError> for ExError {
    fn from(err: MenuError) -> Self {
        let message = err.to_string();
        match err {
            MenuError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(node_id)
                .with_message(message),

            MenuError::ParentNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(node_id)
                .with_op("find_parent")
                .with_message(message),

            MenuError::StructureLimit { .. } => {
                ExError::new(ExErrorKind::StructureLimit).with_message(message)
            }

            MenuError::StructureInvalid { violations } => {
                ExError::new(ExErrorKind::StructureInvalid)
                    .with_message(message)
                    .with_violations(violations)
            }

            MenuError::Cycle { node_id, .. } => ExError::new(ExErrorKind::CycleDetected)
                .with_entity_id(node_id)
                .with_message(message),

            MenuError::HasChildren { node_id, .. } => ExError::new(ExErrorKind::HasChildren)
                .with_entity_id(node_id)
                .with_message(message),

            MenuError::DuplicateNode { node_id } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(node_id)
                .with_message(message),

            MenuError::InvalidName { .. } | MenuError::SiblingSetMismatch { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            MenuError::NotDraft { version_id, .. } => ExError::new(ExErrorKind::NotDraft)
                .with_version_id(version_id)
                .with_message(message),

            MenuError::InvalidRollbackTarget { version_id } => {
                ExError::new(ExErrorKind::InvalidRollbackTarget)
                    .with_version_id(version_id)
                    .with_message(message)
            }

            MenuError::InvalidTransition { version_id, .. } => {
                ExError::new(ExErrorKind::InvalidTransition)
                    .with_version_id(version_id)
                    .with_message(message)
            }

            MenuError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to MenuError
impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::Serialization {
            message: err.to_string(),
        }
    }
}

//! Version lifecycle state machine
//!
//! ```text
//!   Draft ──publish──▶ Published ──archive──▶ Archived
//!     │
//!     └──discard──▶ (deleted)
//! ```
//!
//! Rollback never changes the target; it creates a fresh Draft.

use crate::errors::{MenuError, Result};
use crate::model::{Version, VersionStatus};

/// A lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Publish,
    Archive,
    Discard,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Publish => "publish",
            Transition::Archive => "archive",
            Transition::Discard => "discard",
        }
    }

    /// Status required before the transition
    pub fn from_status(&self) -> VersionStatus {
        match self {
            Transition::Publish | Transition::Discard => VersionStatus::Draft,
            Transition::Archive => VersionStatus::Published,
        }
    }

    /// Status after the transition; `None` when the version is deleted
    pub fn to_status(&self) -> Option<VersionStatus> {
        match self {
            Transition::Publish => Some(VersionStatus::Published),
            Transition::Archive => Some(VersionStatus::Archived),
            Transition::Discard => None,
        }
    }

    /// Check that `version` may take this transition
    pub fn check(&self, version: &Version) -> Result<()> {
        if version.status != self.from_status() {
            return Err(MenuError::InvalidTransition {
                version_id: version.id.clone(),
                status: version.status.to_string(),
                transition: self.as_str().to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve what "archive" means for a version
///
/// A Draft is discarded, a Published version is archived, an Archived
/// version is rejected.
pub fn archive_transition(version: &Version) -> Result<Transition> {
    match version.status {
        VersionStatus::Draft => Ok(Transition::Discard),
        VersionStatus::Published => Ok(Transition::Archive),
        VersionStatus::Archived => Err(MenuError::InvalidTransition {
            version_id: version.id.clone(),
            status: version.status.to_string(),
            transition: Transition::Archive.as_str().to_string(),
        }),
    }
}

/// Require a Draft for tree edits and publishing
pub fn ensure_draft(version: &Version) -> Result<()> {
    if !version.is_draft() {
        return Err(MenuError::NotDraft {
            version_id: version.id.clone(),
            status: version.status.to_string(),
        });
    }
    Ok(())
}

/// Check that a version can be rolled back to
pub fn ensure_rollback_target(version: &Version) -> Result<()> {
    if version.is_draft() {
        return Err(MenuError::InvalidRollbackTarget {
            version_id: version.id.clone(),
        });
    }
    Ok(())
}

pub fn rollback_description(target: &Version) -> String {
    format!("Rollback to {} ({})", target.version_label, target.id)
}

/// Suggest the next `vN` label from existing labels
///
/// Labels not of the form `v<digits>` are ignored.
pub fn next_version_label<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|label| label.strip_prefix('v'))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("v{}", highest + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(status: VersionStatus) -> Version {
        let mut v = Version::new_draft("acct", "v1", "test");
        v.status = status;
        v
    }

    #[test]
    fn test_transition_table() {
        assert!(Transition::Publish.check(&version(VersionStatus::Draft)).is_ok());
        assert!(Transition::Publish
            .check(&version(VersionStatus::Published))
            .is_err());
        assert!(Transition::Archive
            .check(&version(VersionStatus::Published))
            .is_ok());
        assert!(Transition::Archive.check(&version(VersionStatus::Draft)).is_err());
        assert_eq!(Transition::Discard.to_status(), None);
    }

    #[test]
    fn test_archive_dispatch() {
        assert_eq!(
            archive_transition(&version(VersionStatus::Draft)).unwrap(),
            Transition::Discard
        );
        assert_eq!(
            archive_transition(&version(VersionStatus::Published)).unwrap(),
            Transition::Archive
        );
        assert!(matches!(
            archive_transition(&version(VersionStatus::Archived)),
            Err(MenuError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_rollback_target_must_not_be_draft() {
        assert!(matches!(
            ensure_rollback_target(&version(VersionStatus::Draft)),
            Err(MenuError::InvalidRollbackTarget { .. })
        ));
        assert!(ensure_rollback_target(&version(VersionStatus::Archived)).is_ok());
        assert!(ensure_rollback_target(&version(VersionStatus::Published)).is_ok());
    }

    #[test]
    fn test_next_version_label() {
        assert_eq!(next_version_label(Vec::<&str>::new()), "v1");
        assert_eq!(next_version_label(["v1", "v3", "hotfix", "v2"]), "v4");
        assert_eq!(next_version_label(["release", "vX"]), "v1");
    }

    #[test]
    fn test_rollback_description() {
        let target = version(VersionStatus::Archived);
        assert_eq!(
            rollback_description(&target),
            format!("Rollback to v1 ({})", target.id)
        );
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    Published,
    Archived,
}

impl VersionStatus {
    /// Storage name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Published => "published",
            VersionStatus::Archived => "archived",
        }
    }

    /// Parse a storage name; `None` for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(VersionStatus::Draft),
            "published" => Some(VersionStatus::Published),
            "archived" => Some(VersionStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A publishable version of an account's menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Unique identifier (UUID v7)
    pub id: String,

    pub account_id: String,

    /// Human label, suggested as `v{N}` but not enforced unique
    pub version_label: String,

    pub description: String,

    pub status: VersionStatus,

    pub published_at: Option<DateTime<Utc>>,
    pub published_by: Option<String>,

    /// Version this one was cloned from, if any
    pub copied_from_version_id: Option<String>,

    /// Exact wire document sent to the remote target; written once per
    /// publish attempt and never edited afterwards
    pub menu_snapshot: Option<String>,

    /// SHA-256 of `menu_snapshot`
    pub snapshot_digest: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Version {
    /// Create a new Draft version
    pub fn new_draft(
        account_id: impl Into<String>,
        version_label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            account_id: account_id.into(),
            version_label: version_label.into(),
            description: description.into(),
            status: VersionStatus::Draft,
            published_at: None,
            published_by: None,
            copied_from_version_id: None,
            menu_snapshot: None,
            snapshot_digest: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == VersionStatus::Draft
    }

    pub fn is_published(&self) -> bool {
        self.status == VersionStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft() {
        let version = Version::new_draft("acct-1", "v1", "first");

        assert_eq!(version.account_id, "acct-1");
        assert_eq!(version.version_label, "v1");
        assert!(version.is_draft());
        assert!(!version.is_published());
        assert!(version.menu_snapshot.is_none());
        assert!(version.copied_from_version_id.is_none());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VersionStatus::Draft,
            VersionStatus::Published,
            VersionStatus::Archived,
        ] {
            assert_eq!(VersionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VersionStatus::parse("deleted"), None);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response type of a menu entry
///
/// The kind decides which of the type-specific fields the remote platform
/// needs; required-ness is checked by the structural validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuKind {
    Click,
    View,
    Miniprogram,
    ScancodePush,
    ScancodeWaitmsg,
    PicSysphoto,
    PicPhotoOrAlbum,
    PicWeixin,
    LocationSelect,
    MediaId,
    ViewLimited,
}

impl MenuKind {
    pub const ALL: [MenuKind; 11] = [
        MenuKind::Click,
        MenuKind::View,
        MenuKind::Miniprogram,
        MenuKind::ScancodePush,
        MenuKind::ScancodeWaitmsg,
        MenuKind::PicSysphoto,
        MenuKind::PicPhotoOrAlbum,
        MenuKind::PicWeixin,
        MenuKind::LocationSelect,
        MenuKind::MediaId,
        MenuKind::ViewLimited,
    ];

    /// Wire/storage name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuKind::Click => "click",
            MenuKind::View => "view",
            MenuKind::Miniprogram => "miniprogram",
            MenuKind::ScancodePush => "scancode_push",
            MenuKind::ScancodeWaitmsg => "scancode_waitmsg",
            MenuKind::PicSysphoto => "pic_sysphoto",
            MenuKind::PicPhotoOrAlbum => "pic_photo_or_album",
            MenuKind::PicWeixin => "pic_weixin",
            MenuKind::LocationSelect => "location_select",
            MenuKind::MediaId => "media_id",
            MenuKind::ViewLimited => "view_limited",
        }
    }

    /// Parse a wire/storage name; `None` for unknown kinds
    pub fn parse(s: &str) -> Option<Self> {
        MenuKind::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for MenuKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root association of a node family
///
/// Live nodes belong to an account; versioned nodes belong to a version and
/// may carry a lineage id linking them to the node they were cloned from.
pub trait NodeScope: Clone + std::fmt::Debug + PartialEq {
    /// Account id or version id owning the node
    fn owner_id(&self) -> &str;

    /// Cross-version identity, if the node was cloned from another node
    fn lineage_id(&self) -> Option<&str>;
}

/// Scope of a live node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountScope {
    pub account_id: String,
}

impl AccountScope {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

impl NodeScope for AccountScope {
    fn owner_id(&self) -> &str {
        &self.account_id
    }

    fn lineage_id(&self) -> Option<&str> {
        None
    }
}

/// Scope of a versioned node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionScope {
    pub version_id: String,
    pub lineage_id: Option<String>,
}

impl VersionScope {
    /// Scope for a node born in this version (no lineage yet)
    pub fn new(version_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            lineage_id: None,
        }
    }

    /// Scope for a node cloned from another node
    pub fn with_lineage(version_id: impl Into<String>, lineage_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            lineage_id: Some(lineage_id.into()),
        }
    }
}

impl NodeScope for VersionScope {
    fn owner_id(&self) -> &str {
        &self.version_id
    }

    fn lineage_id(&self) -> Option<&str> {
        self.lineage_id.as_deref()
    }
}

/// Menu node, generic over its root association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode<S> {
    /// Unique identifier (UUID v7, so id order is creation order)
    pub id: String,

    /// Parent node id (None for root nodes)
    pub parent_id: Option<String>,

    pub name: String,
    pub kind: MenuKind,

    pub click_key: Option<String>,
    pub url: Option<String>,
    pub app_id: Option<String>,
    pub page_path: Option<String>,
    pub media_id: Option<String>,

    /// Sibling order, ascending; ties broken by id
    pub position: i64,

    /// Independent of the parent's flag
    pub enabled: bool,

    pub scope: S,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<S: NodeScope> MenuNode<S> {
    /// Build a new root-level node from a draft, with a fresh UUID v7 id
    ///
    /// Parent and position are assigned when the node is attached to a tree.
    pub fn from_draft(scope: S, draft: NodeDraft) -> Self {
        Self::with_id(Uuid::now_v7().to_string(), scope, draft)
    }

    /// Build a node with an explicit id
    pub fn with_id(id: impl Into<String>, scope: S, draft: NodeDraft) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            parent_id: None,
            name: draft.name,
            kind: draft.kind,
            click_key: draft.click_key,
            url: draft.url,
            app_id: draft.app_id,
            page_path: draft.page_path,
            media_id: draft.media_id,
            position: 0,
            enabled: draft.enabled,
            scope,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this node is a root (has no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Identity used to match the same logical node across versions
    pub fn lineage_key(&self) -> &str {
        self.scope.lineage_id().unwrap_or(&self.id)
    }

    /// Clone every content field into a node of another scope
    ///
    /// Identity, parent and scope are replaced; timestamps are fresh because
    /// the clone is a new row.
    pub fn clone_with_scope<T: NodeScope>(
        &self,
        id: String,
        parent_id: Option<String>,
        scope: T,
    ) -> MenuNode<T> {
        let now = Utc::now();
        MenuNode {
            id,
            parent_id,
            name: self.name.clone(),
            kind: self.kind,
            click_key: self.click_key.clone(),
            url: self.url.clone(),
            app_id: self.app_id.clone(),
            page_path: self.page_path.clone(),
            media_id: self.media_id.clone(),
            position: self.position,
            enabled: self.enabled,
            scope,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a content patch, touching `updated_at`
    pub fn apply_patch(&mut self, patch: NodePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(click_key) = patch.click_key {
            self.click_key = click_key;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(app_id) = patch.app_id {
            self.app_id = app_id;
        }
        if let Some(page_path) = patch.page_path {
            self.page_path = page_path;
        }
        if let Some(media_id) = patch.media_id {
            self.media_id = media_id;
        }
        self.updated_at = Utc::now();
    }
}

/// Content of a node about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraft {
    pub name: String,
    pub kind: MenuKind,
    pub click_key: Option<String>,
    pub url: Option<String>,
    pub app_id: Option<String>,
    pub page_path: Option<String>,
    pub media_id: Option<String>,
    pub enabled: bool,
}

impl NodeDraft {
    /// Enabled draft with no type-specific fields set
    pub fn new(name: impl Into<String>, kind: MenuKind) -> Self {
        Self {
            name: name.into(),
            kind,
            click_key: None,
            url: None,
            app_id: None,
            page_path: None,
            media_id: None,
            enabled: true,
        }
    }

    /// Click-style entry with an event key
    pub fn click(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(name, MenuKind::Click).with_click_key(key)
    }

    /// Link entry
    pub fn view(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, MenuKind::View).with_url(url)
    }

    pub fn with_click_key(mut self, key: impl Into<String>) -> Self {
        self.click_key = Some(key.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_page_path(mut self, page_path: impl Into<String>) -> Self {
        self.page_path = Some(page_path.into());
        self
    }

    pub fn with_media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Partial content update
///
/// Outer `None` leaves a field untouched; for optional fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub kind: Option<MenuKind>,
    pub click_key: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub app_id: Option<Option<String>>,
    pub page_path: Option<Option<String>>,
    pub media_id: Option<Option<String>>,
}

impl NodePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

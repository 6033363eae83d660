//! Contracts for the host platform collaborators this engine calls into.
//!
//! The engine is host-agnostic: everything it needs from the surrounding
//! platform (template storage, submission persistence, localization,
//! content creation, profile updates, category enumeration) is reached
//! through the traits in this module, bundled into a [`Host`].

use crate::error::StoreError;
use crate::submission::Submission;
use ahash::AHashMap;
use serde_json::Value;

/// Loads the declarative template tree for a wizard id. `None` signals
/// "no such wizard" and results in no wizard being built.
pub trait TemplateSource: Send + Sync {
    fn load(&self, wizard_id: &str) -> Option<Value>;
}

/// Whole-history persistence for (wizard, user) submission sequences.
/// There is no partial-update operation; callers always read and rewrite
/// the full ordered history.
pub trait SubmissionStore: Send + Sync {
    /// Loads the ordered history, empty if nothing was ever persisted.
    fn load(&self, wizard_id: &str, user_id: i64) -> Vec<Submission>;

    fn save(
        &self,
        wizard_id: &str,
        user_id: i64,
        history: &[Submission],
    ) -> Result<(), StoreError>;
}

/// A content category visible to a given user, as exposed by the host's
/// `categories` choice preset.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub attrs: AHashMap<String, Value>,
}

impl Category {
    /// Attribute lookup used by choice filters. `id` and `name` resolve
    /// from the struct itself; everything else comes from `attrs`.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::from(self.id)),
            "name" => Some(Value::String(self.name.clone())),
            _ => self.attrs.get(key).cloned(),
        }
    }
}

/// Enumerates the categories visible to the requesting user, in the
/// host's display order.
pub trait CategoryProvider: Send + Sync {
    fn categories(&self, user_id: i64) -> Vec<Category>;
}

/// The result of a localization lookup: a plain string, a flat key ->
/// label map (order preserved), or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Text(String),
    Map(Vec<(String, String)>),
    Missing,
}

impl Translation {
    pub fn into_text(self) -> Option<String> {
        match self {
            Translation::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Localized string lookup. `params` are interpolation pairs; what the
/// host does with them is its own business.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> Translation;
}

/// Whether new content is a regular (public) topic or a private message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Archetype {
    #[default]
    Regular,
    PrivateMessage,
}

/// Parameters for one content-creation call.
#[derive(Debug, Clone, Default)]
pub struct NewContent {
    pub title: String,
    pub raw: Option<String>,
    pub category_id: Option<i64>,
    pub archetype: Archetype,
    pub target_usernames: Vec<String>,
    /// Direct top-level attributes from `add_fields` mappings.
    pub attributes: Vec<(String, Value)>,
    /// Post-scoped custom fields, applied at creation time.
    pub custom_fields: Vec<(String, Value)>,
    pub skip_validations: bool,
}

/// What the host's content subsystem reports back: accumulated error
/// messages, and the created content when there were none.
#[derive(Debug, Clone, Default)]
pub struct ContentOutcome {
    pub errors: Vec<String>,
    pub created: Option<CreatedContent>,
}

/// Identifies freshly created content: the content item itself and the
/// container (topic or conversation) it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedContent {
    pub id: i64,
    pub container_id: i64,
}

/// Creates topics, posts and private messages on the host platform.
pub trait ContentCreator: Send + Sync {
    fn create(&self, user_id: i64, content: NewContent) -> ContentOutcome;

    /// Applies container-scoped custom fields after creation. Hosts with
    /// no such concept can keep the default no-op.
    fn apply_container_fields(&self, container_id: i64, fields: &[(String, Value)]) {
        let _ = (container_id, fields);
    }
}

/// Applies profile attribute updates for a user. Failures stay on the
/// host's side; the engine treats this as fire-and-forget.
pub trait ProfileUpdater: Send + Sync {
    fn update(&self, user_id: i64, attributes: &[(String, Value)]);
}

/// The full bundle of host collaborators a wizard build and its step
/// submissions need. Owned by the embedding request handler and passed by
/// reference; per-request state never crosses requests.
pub struct Host {
    pub templates: Box<dyn TemplateSource>,
    pub store: Box<dyn SubmissionStore>,
    pub categories: Box<dyn CategoryProvider>,
    pub translator: Box<dyn Translator>,
    pub content: Box<dyn ContentCreator>,
    pub profiles: Box<dyn ProfileUpdater>,
}

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved submission key holding the owning user's id.
pub const USER_ID_KEY: &str = "user_id";
/// Reserved submission key marking a submission as finished.
pub const COMPLETED_KEY: &str = "completed";

/// The accumulated answers of one pass through a wizard: a mapping from
/// field identifier (plus the reserved `user_id` and `completed` keys) to
/// scalar values. Serializes transparently as the underlying map so the
/// host store sees plain objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    values: AHashMap<String, Value>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: AHashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn values(&self) -> &AHashMap<String, Value> {
        &self.values
    }

    pub fn completed(&self) -> bool {
        matches!(self.values.get(COMPLETED_KEY), Some(Value::Bool(true)))
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.values
            .insert(COMPLETED_KEY.to_string(), Value::Bool(completed));
    }

    pub fn user_id(&self) -> Option<i64> {
        self.values.get(USER_ID_KEY).and_then(Value::as_i64)
    }

    pub fn set_user_id(&mut self, user_id: i64) {
        self.values
            .insert(USER_ID_KEY.to_string(), Value::from(user_id));
    }

    /// Merges one step's raw input into the submission. A key already set
    /// by an earlier step is only overwritten when the same key is
    /// resubmitted.
    pub fn merge_input(&mut self, input: &AHashMap<String, Value>) {
        for (key, value) in input {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

/// The ordered submission history for one (wizard, user) pair. Insertion
/// order is chronological.
///
/// Invariant: at most one entry is a draft (`completed = false`), and a
/// draft is always the tail entry. `take_draft` and `push` are the only
/// mutation points, so older drafts are never revisited.
#[derive(Debug, Clone, Default)]
pub struct SubmissionHistory {
    entries: Vec<Submission>,
}

impl SubmissionHistory {
    pub fn from_entries(entries: Vec<Submission>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Submission] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The in-flight submission: the tail entry, iff it is not completed.
    pub fn draft(&self) -> Option<&Submission> {
        self.entries.last().filter(|s| !s.completed())
    }

    /// Removes and returns the draft from the tail, if present.
    pub fn take_draft(&mut self) -> Option<Submission> {
        if self.draft().is_some() {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn push(&mut self, submission: Submission) {
        self.entries.push(submission);
    }

    pub fn has_completed(&self) -> bool {
        self.entries.iter().any(Submission::completed)
    }
}

/// Presence test shared by prefill and action preconditions: `null` and
/// blank strings are absent, every other scalar is present.
pub(crate) fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

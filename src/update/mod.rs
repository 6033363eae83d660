//! Per-submission update state: the [`Updater`] value threaded through
//! the pipeline stages, and the outcome it reports.

use crate::submission::Submission;
use ahash::AHashMap;
use serde_json::Value;

pub(crate) mod actions;
pub(crate) mod pipeline;

/// The transient state of one step submission. One `Updater` exists per
/// submission; every pipeline stage (field validation, extension
/// handlers, actions) appends to its error collection instead of
/// capturing shared state.
#[derive(Clone)]
pub struct Updater {
    pub wizard_id: String,
    pub user_id: i64,
    pub step_id: String,
    /// True when the submitted step has no successor; drives the
    /// `completed` flag on the persisted submission.
    pub final_step: bool,
    /// Raw input, keyed by field identifier.
    pub input: AHashMap<String, Value>,
    /// Snapshot of the draft submission at submission time, if any.
    pub draft: Option<Submission>,
    errors: Vec<(String, String)>,
    pub result: Option<UpdateOutcome>,
}

/// The result payload set by a successful side-effecting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    TopicCreated { topic_id: i64 },
    MessageSent { topic_id: i64 },
}

impl Updater {
    pub(crate) fn new(
        wizard_id: &str,
        user_id: i64,
        step_id: &str,
        final_step: bool,
        input: AHashMap<String, Value>,
        draft: Option<Submission>,
    ) -> Self {
        Self {
            wizard_id: wizard_id.to_string(),
            user_id,
            step_id: step_id.to_string(),
            final_step,
            input,
            draft,
            errors: Vec::new(),
            result: None,
        }
    }

    /// Records an error scoped to a field identifier or a fixed action
    /// key. Errors accumulate; nothing is ever dropped.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.push((key.into(), message.into()));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All recorded errors, in the order they were recorded.
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    /// Errors recorded under one key, e.g. a failing field's id.
    pub fn errors_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.errors
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, message)| message.as_str())
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

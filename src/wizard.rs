//! Live wizard types materialized from a template: the wizard itself,
//! its ordered steps, their fields and resolved choices.

use crate::error::SubmitError;
use crate::host::Host;
use crate::registry::HandlerRegistry;
use crate::submission::SubmissionHistory;
use crate::template::StepDef;
use crate::update::pipeline::{self, PipelineContext};
use crate::update::Updater;
use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;

/// One resolved dropdown option.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: Value,
    pub label: String,
}

/// A live field: template attributes copied present-if-set, plus the
/// resolved choice list and any value prefilled from the draft.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: String,
    pub field_type: String,
    pub required: bool,
    pub label: Option<String>,
    pub description: Option<String>,
    pub key: Option<String>,
    pub value: Option<Value>,
    pub choices: Vec<Choice>,
}

/// A live step. Holds its fields for rendering by the host and keeps the
/// originating definition around for update processing.
#[derive(Clone)]
pub struct Step {
    pub id: String,
    pub index: usize,
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub key: Option<String>,
    pub fields: Vec<Field>,
    pub(crate) def: Arc<StepDef>,
}

/// A wizard built for one (wizard id, user) pair: the live steps, the
/// user's submission history, and the handler snapshot consulted on every
/// update. Exclusively owned by one request.
pub struct Wizard {
    pub id: String,
    pub user_id: i64,
    pub name: Option<String>,
    pub background: Option<String>,
    pub save_submissions: bool,
    pub multiple_submissions: bool,
    pub(crate) steps: Vec<Step>,
    pub(crate) history: SubmissionHistory,
    pub(crate) registry: HandlerRegistry,
}

impl Wizard {
    /// The live steps, in template order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Whether this user has at least one completed pass through the
    /// wizard.
    pub fn completed(&self) -> bool {
        self.history.has_completed()
    }

    pub fn submissions(&self) -> &SubmissionHistory {
        &self.history
    }

    /// Submits one step's raw input through the update pipeline: field
    /// validation, extension handlers, configured actions, and the
    /// persistence decision. Returns the [`Updater`] carrying accumulated
    /// errors and any result payload.
    pub fn submit(
        &mut self,
        step_id: &str,
        input: AHashMap<String, Value>,
        host: &Host,
    ) -> Result<Updater, SubmitError> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| SubmitError::UnknownStep {
                wizard_id: self.id.clone(),
                step_id: step_id.to_string(),
            })?;

        let def = self.steps[index].def.clone();
        let cx = PipelineContext {
            def: def.as_ref(),
            wizard_id: &self.id,
            user_id: self.user_id,
            save_submissions: self.save_submissions,
            final_step: index + 1 == self.steps.len(),
            host,
            registry: &self.registry,
        };

        let updater = pipeline::run(cx, &mut self.history, input)?;
        Ok(updater)
    }
}

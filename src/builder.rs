//! The top-level orchestrator: loads a template and a user's submission
//! history, materializes the live steps, and returns the wizard.

use crate::choices;
use crate::error::TemplateError;
use crate::host::Host;
use crate::registry::{self, HandlerRegistry};
use crate::submission::{present, SubmissionHistory};
use crate::template::{StepDef, WizardTemplate};
use crate::wizard::{Field, Step, Wizard};
use log::debug;
use std::sync::Arc;

/// Builds live wizards against a host. Construction is cheap; one builder
/// can serve many `build` calls within a request scope.
pub struct WizardBuilder<'a> {
    host: &'a Host,
    registry: HandlerRegistry,
}

impl<'a> WizardBuilder<'a> {
    /// Creates a builder using the process-wide handler registry (empty
    /// when none was installed).
    pub fn new(host: &'a Host) -> Self {
        Self {
            host,
            registry: registry::global(),
        }
    }

    /// Overrides the handler registry consulted during updates.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Builds the wizard for a (wizard id, user) pair.
    ///
    /// Returns `Ok(None)` when the host has no template under that id:
    /// "not found" is a no-op, not an error. A user who already completed
    /// the wizard gets zero live steps unless the template allows
    /// multiple submissions.
    pub fn build(&self, wizard_id: &str, user_id: i64) -> Result<Option<Wizard>, TemplateError> {
        let Some(data) = self.host.templates.load(wizard_id).filter(|v| !v.is_null()) else {
            debug!("no template found for wizard '{}'", wizard_id);
            return Ok(None);
        };

        let template = WizardTemplate::from_value(wizard_id, &data)?;
        let history =
            SubmissionHistory::from_entries(self.host.store.load(wizard_id, user_id));

        let mut steps = Vec::new();
        if history.has_completed() && !template.multiple_submissions {
            debug!(
                "wizard '{}' already completed by user {}; building without steps",
                wizard_id, user_id
            );
        } else {
            for (index, def) in template.steps.iter().enumerate() {
                steps.push(self.materialize_step(def, index, &history, user_id));
            }
        }

        debug!("built wizard '{}' with {} step(s)", wizard_id, steps.len());

        Ok(Some(Wizard {
            id: template.id,
            user_id,
            name: template.name,
            background: template.background,
            save_submissions: template.save_submissions,
            multiple_submissions: template.multiple_submissions,
            steps,
            history,
            registry: self.registry.clone(),
        }))
    }

    /// Materializes one live step: fields attach in definition order,
    /// dropdowns get resolved choice lists, and the draft submission (and
    /// only the draft) seeds default values so an interrupted step can be
    /// resumed without touching finished data.
    fn materialize_step(
        &self,
        def: &StepDef,
        index: usize,
        history: &SubmissionHistory,
        user_id: i64,
    ) -> Step {
        let draft = history.draft();

        let fields = def
            .fields
            .iter()
            .map(|field_def| Field {
                id: field_def.id.clone(),
                field_type: field_def.field_type.clone(),
                required: field_def.required,
                label: field_def.label.clone(),
                description: field_def.description.clone(),
                key: field_def.key.clone(),
                value: draft
                    .and_then(|d| d.get(&field_def.id))
                    .filter(|v| present(v))
                    .cloned(),
                choices: if field_def.field_type == "dropdown" {
                    choices::resolve(field_def, user_id, self.host)
                } else {
                    Vec::new()
                },
            })
            .collect();

        Step {
            id: def.id.clone(),
            index,
            title: def.title.clone(),
            description: def.description.clone(),
            banner: def.banner.clone(),
            key: def.key.clone(),
            fields,
            def: Arc::new(def.clone()),
        }
    }
}

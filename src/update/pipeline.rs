//! The per-step submission pipeline: field validation, extension
//! handlers, action execution, and the persistence decision. Each stage
//! short-circuits when a previous stage recorded an error.

use super::{actions, Updater};
use crate::error::StoreError;
use crate::host::Host;
use crate::registry::HandlerRegistry;
use crate::submission::{Submission, SubmissionHistory};
use crate::template::{FieldDef, StepDef};
use ahash::AHashMap;
use log::debug;
use serde_json::Value;

/// Localization key for the minimum-length validation message.
const TOO_SHORT_KEY: &str = "wizard.field.too_short";

/// Everything one pipeline run needs besides the mutable history.
pub(crate) struct PipelineContext<'a> {
    pub def: &'a StepDef,
    pub wizard_id: &'a str,
    pub user_id: i64,
    pub save_submissions: bool,
    pub final_step: bool,
    pub host: &'a Host,
    pub registry: &'a HandlerRegistry,
}

pub(crate) fn run(
    cx: PipelineContext<'_>,
    history: &mut SubmissionHistory,
    input: AHashMap<String, Value>,
) -> Result<Updater, StoreError> {
    let mut updater = Updater::new(
        cx.wizard_id,
        cx.user_id,
        &cx.def.id,
        cx.final_step,
        input,
        history.draft().cloned(),
    );

    validate_fields(&cx, &mut updater);
    if updater.has_errors() {
        debug!(
            "wizard '{}' step '{}': field validation recorded {} error(s)",
            cx.wizard_id,
            cx.def.id,
            updater.errors().len()
        );
        return Ok(updater);
    }

    for entry in cx.registry.for_wizard(cx.wizard_id) {
        entry.call(&mut updater);
    }
    if updater.has_errors() {
        debug!(
            "wizard '{}' step '{}': extension handlers recorded errors",
            cx.wizard_id, cx.def.id
        );
        return Ok(updater);
    }

    // Actions never see data the wizard policy says should not be
    // retained: with saving enabled they get the merged draft (which does
    // not yet include this step's input), otherwise only the raw input.
    let selected: AHashMap<String, Value> = if cx.save_submissions {
        history
            .draft()
            .map(|draft| draft.values().clone())
            .unwrap_or_default()
    } else {
        updater.input.clone()
    };

    actions::execute(&cx, &selected, &mut updater);

    if cx.save_submissions && !updater.has_errors() {
        persist(&cx, history, &updater)?;
    }

    Ok(updater)
}

/// Checks every field's minimum-length constraint against the raw input.
/// All fields are checked; validation never stops at the first failure.
fn validate_fields(cx: &PipelineContext<'_>, updater: &mut Updater) {
    for field in &cx.def.fields {
        let Some(min) = field.min_length else {
            continue;
        };
        let Some(Value::String(value)) = updater.input.get(&field.id) else {
            continue;
        };
        if value.chars().count() < min {
            let message = too_short_message(cx, field, min);
            updater.add_error(field.id.clone(), message);
        }
    }
}

/// Builds the validation message, resolving the field label in preference
/// order {explicit label, localized label by key, field id}.
fn too_short_message(cx: &PipelineContext<'_>, field: &FieldDef, min: usize) -> String {
    let label = field
        .label
        .clone()
        .or_else(|| {
            let key = field.key.as_ref()?;
            cx.host
                .translator
                .translate(&format!("{key}.label"), &[])
                .into_text()
        })
        .unwrap_or_else(|| field.id.clone());

    let min_text = min.to_string();
    cx.host
        .translator
        .translate(TOO_SHORT_KEY, &[("label", &label), ("min", &min_text)])
        .into_text()
        .unwrap_or_else(|| format!("{label} must be at least {min_text} characters"))
}

/// Rewrites the history tail: the draft (or a fresh submission) absorbs
/// this step's input, is stamped with the user id and completion state,
/// and the whole history goes back through the store. Read-modify-write;
/// concurrent submissions for the same user can still clobber each other.
fn persist(
    cx: &PipelineContext<'_>,
    history: &mut SubmissionHistory,
    updater: &Updater,
) -> Result<(), StoreError> {
    let mut submission = history.take_draft().unwrap_or_else(Submission::new);
    submission.set_user_id(cx.user_id);
    submission.set_completed(cx.final_step);
    submission.merge_input(&updater.input);
    history.push(submission);

    cx.host
        .store
        .save(cx.wizard_id, cx.user_id, history.entries())
}

//! Executes a step's configured actions against the selected submission
//! data. Actions run in definition order; each guards only its own
//! precondition, and one action's failure never aborts a later one.

use super::pipeline::PipelineContext;
use super::{UpdateOutcome, Updater};
use crate::host::{Archetype, NewContent};
use crate::submission::present;
use crate::template::{ActionDef, FieldMapping};
use ahash::AHashMap;
use itertools::Itertools;
use log::warn;
use serde_json::Value;

/// Fixed error key for failed topic creation.
const CREATE_TOPIC_KEY: &str = "create_topic";
/// Fixed error key for failed message sending.
const SEND_MESSAGE_KEY: &str = "send_message";

pub(crate) fn execute(
    cx: &PipelineContext<'_>,
    data: &AHashMap<String, Value>,
    updater: &mut Updater,
) {
    for action in &cx.def.actions {
        match action {
            ActionDef::CreateTopic {
                title_field,
                body_field,
                category_id,
                add_fields,
            } => create_topic(cx, data, updater, title_field, body_field, *category_id, add_fields),
            ActionDef::SendMessage {
                title_field,
                body_field,
                target_usernames,
            } => send_message(cx, data, updater, title_field, body_field, target_usernames),
            ActionDef::UpdateProfile { updates } => update_profile(cx, data, updates),
        }
    }
}

fn create_topic(
    cx: &PipelineContext<'_>,
    data: &AHashMap<String, Value>,
    updater: &mut Updater,
    title_field: &str,
    body_field: &Option<String>,
    category_id: Option<i64>,
    add_fields: &[FieldMapping],
) {
    // Precondition only: a missing title is not an error, the action
    // simply does not fire.
    let Some(title) = resolve_text(data, title_field) else {
        return;
    };

    let mut content = NewContent {
        title,
        raw: body_field.as_deref().and_then(|f| resolve_text(data, f)),
        category_id,
        archetype: Archetype::Regular,
        skip_validations: true,
        ..NewContent::default()
    };

    let topic_fields = route_add_fields(data, add_fields, &mut content);

    let outcome = cx.host.content.create(cx.user_id, content);
    if !outcome.errors.is_empty() {
        let joined = outcome.errors.iter().join(" ");
        warn!(
            "wizard '{}' step '{}': create_topic failed: {}",
            cx.wizard_id, cx.def.id, joined
        );
        updater.add_error(CREATE_TOPIC_KEY, joined);
    } else if let Some(created) = outcome.created {
        if !topic_fields.is_empty() {
            cx.host
                .content
                .apply_container_fields(created.container_id, &topic_fields);
        }
        updater.result = Some(UpdateOutcome::TopicCreated {
            topic_id: created.container_id,
        });
    }
}

/// Splits `add_fields` mappings between the new content's direct
/// attributes, its post-scoped custom fields, and the topic-scoped custom
/// fields returned for post-creation application. A dotted
/// `<scope>.custom_fields.<name>` key routes by scope; any other dotted
/// custom-field key is dropped; plain keys become direct attributes.
fn route_add_fields(
    data: &AHashMap<String, Value>,
    add_fields: &[FieldMapping],
    content: &mut NewContent,
) -> Vec<(String, Value)> {
    let mut topic_fields = Vec::new();

    for mapping in add_fields {
        let Some(value) = data.get(&mapping.source).filter(|v| present(v)).cloned() else {
            continue;
        };

        if mapping.key.contains("custom_fields") {
            let parts: Vec<&str> = mapping.key.split('.').collect();
            if let ["topic", "custom_fields", name] = parts.as_slice() {
                topic_fields.push((name.to_string(), value));
            } else if let ["post", "custom_fields", name] = parts.as_slice() {
                content.custom_fields.push((name.to_string(), value));
            }
        } else {
            content.attributes.push((mapping.key.clone(), value));
        }
    }

    topic_fields
}

fn send_message(
    cx: &PipelineContext<'_>,
    data: &AHashMap<String, Value>,
    updater: &mut Updater,
    title_field: &str,
    body_field: &str,
    target_usernames: &[String],
) {
    // A private message needs both a title and a body.
    let (Some(title), Some(raw)) = (
        resolve_text(data, title_field),
        resolve_text(data, body_field),
    ) else {
        return;
    };

    let content = NewContent {
        title,
        raw: Some(raw),
        archetype: Archetype::PrivateMessage,
        target_usernames: target_usernames.to_vec(),
        ..NewContent::default()
    };

    let outcome = cx.host.content.create(cx.user_id, content);
    if !outcome.errors.is_empty() {
        let joined = outcome.errors.iter().join(" ");
        warn!(
            "wizard '{}' step '{}': send_message failed: {}",
            cx.wizard_id, cx.def.id, joined
        );
        updater.add_error(SEND_MESSAGE_KEY, joined);
    } else if let Some(created) = outcome.created {
        updater.result = Some(UpdateOutcome::MessageSent {
            topic_id: created.container_id,
        });
    }
}

fn update_profile(
    cx: &PipelineContext<'_>,
    data: &AHashMap<String, Value>,
    updates: &[FieldMapping],
) {
    if updates.is_empty() {
        return;
    }

    let attributes: Vec<(String, Value)> = updates
        .iter()
        .filter_map(|mapping| {
            let value = data.get(&mapping.source).filter(|v| present(v))?;
            Some((mapping.key.clone(), value.clone()))
        })
        .collect();

    // An empty resolved attribute map is a silent no-op, never an error.
    if !attributes.is_empty() {
        cx.host.profiles.update(cx.user_id, &attributes);
    }
}

/// Resolves a source field to text, treating absent and blank values as
/// missing. Non-string scalars are rendered so numeric answers can feed
/// titles and attributes.
fn resolve_text(data: &AHashMap<String, Value>, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

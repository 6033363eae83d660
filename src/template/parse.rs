use super::definition::*;
use crate::error::TemplateError;
use log::debug;
use serde_json::Value;

impl WizardTemplate {
    /// Parses the host's loosely-typed template tree into an immutable
    /// `WizardTemplate`.
    ///
    /// Parsing is tolerant by design: absent or blank attributes become
    /// `None` so the live step's own defaults apply, a missing `steps`
    /// array yields an empty wizard, and unrecognized action types are
    /// skipped. The only hard errors are a non-object root and a step or
    /// field without an id.
    pub fn from_value(wizard_id: &str, data: &Value) -> Result<Self, TemplateError> {
        let root = data.as_object().ok_or_else(|| TemplateError::NotAnObject {
            wizard_id: wizard_id.to_string(),
        })?;

        let mut steps = Vec::new();
        if let Some(raw_steps) = root.get("steps").and_then(Value::as_array) {
            for (index, raw) in raw_steps.iter().enumerate() {
                steps.push(parse_step(wizard_id, index, raw)?);
            }
        }

        Ok(WizardTemplate {
            id: wizard_id.to_string(),
            name: text_attr(data, "name"),
            background: text_attr(data, "background"),
            save_submissions: bool_attr(data, "save_submissions"),
            multiple_submissions: bool_attr(data, "multiple_submissions"),
            steps,
        })
    }
}

fn parse_step(wizard_id: &str, index: usize, raw: &Value) -> Result<StepDef, TemplateError> {
    let id = text_attr(raw, "id").ok_or_else(|| TemplateError::MissingStepId {
        wizard_id: wizard_id.to_string(),
        index,
    })?;

    let mut fields = Vec::new();
    if let Some(raw_fields) = raw.get("fields").and_then(Value::as_array) {
        for raw_field in raw_fields {
            fields.push(parse_field(&id, raw_field)?);
        }
    }

    let mut actions = Vec::new();
    if let Some(raw_actions) = raw.get("actions").and_then(Value::as_array) {
        for raw_action in raw_actions {
            if let Some(action) = parse_action(&id, raw_action) {
                actions.push(action);
            }
        }
    }

    Ok(StepDef {
        id,
        title: text_attr(raw, "title"),
        description: text_attr(raw, "description"),
        banner: text_attr(raw, "banner"),
        key: text_attr(raw, "key"),
        fields,
        actions,
    })
}

fn parse_field(step_id: &str, raw: &Value) -> Result<FieldDef, TemplateError> {
    let id = text_attr(raw, "id").ok_or_else(|| TemplateError::MissingFieldId {
        step_id: step_id.to_string(),
    })?;

    Ok(FieldDef {
        id,
        field_type: text_attr(raw, "type").unwrap_or_default(),
        required: bool_attr(raw, "required"),
        label: text_attr(raw, "label"),
        description: text_attr(raw, "description"),
        key: text_attr(raw, "key"),
        min_length: length_attr(raw, "min_length"),
        choices: parse_choice_source(raw),
    })
}

/// Selects the first non-empty choice source in priority order
/// {inline list, localization key, preset}.
fn parse_choice_source(raw: &Value) -> ChoiceSource {
    if let Some(list) = raw.get("choices").and_then(Value::as_array) {
        let choices: Vec<ChoiceDef> = list.iter().filter_map(parse_choice).collect();
        if !choices.is_empty() {
            return ChoiceSource::Inline(choices);
        }
    }

    if let Some(key) = text_attr(raw, "choices_key") {
        return ChoiceSource::Translation(key);
    }

    if let Some(name) = text_attr(raw, "choices_preset") {
        let filters = raw
            .get("choices_filters")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|f| {
                        Some(ChoiceFilter {
                            key: text_attr(f, "key")?,
                            value: f.get("value").cloned()?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        return ChoiceSource::Preset { name, filters };
    }

    ChoiceSource::None
}

fn parse_choice(raw: &Value) -> Option<ChoiceDef> {
    let value = raw.get("value").cloned()?;
    let label = text_attr(raw, "label").or_else(|| value.as_str().map(str::to_string))?;
    Some(ChoiceDef { value, label })
}

fn parse_action(step_id: &str, raw: &Value) -> Option<ActionDef> {
    let action_type = text_attr(raw, "type")?;

    match action_type.as_str() {
        "create_topic" => Some(ActionDef::CreateTopic {
            title_field: text_attr(raw, "title")?,
            body_field: text_attr(raw, "post"),
            category_id: int_attr(raw, "category_id"),
            add_fields: parse_mappings(raw, "add_fields"),
        }),
        "send_message" => Some(ActionDef::SendMessage {
            title_field: text_attr(raw, "title")?,
            body_field: text_attr(raw, "post")?,
            target_usernames: parse_usernames(raw.get("username")),
        }),
        "update_profile" => Some(ActionDef::UpdateProfile {
            updates: parse_mappings(raw, "profile_updates"),
        }),
        other => {
            // Tolerated, not an error: the step simply has no such action.
            debug!("step '{}': skipping unknown action type '{}'", step_id, other);
            None
        }
    }
}

fn parse_mappings(raw: &Value, attr: &str) -> Vec<FieldMapping> {
    raw.get(attr)
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|m| {
                    Some(FieldMapping {
                        key: text_attr(m, "key")?,
                        source: text_attr(m, "value")?,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Accepts either a single username string or a list of them.
fn parse_usernames(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Present-if-set string attribute: absent, non-string, or blank values
/// all read as `None`.
fn text_attr(raw: &Value, attr: &str) -> Option<String> {
    raw.get(attr)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn bool_attr(raw: &Value, attr: &str) -> bool {
    raw.get(attr).and_then(Value::as_bool).unwrap_or(false)
}

fn int_attr(raw: &Value, attr: &str) -> Option<i64> {
    let value = raw.get(attr)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// Length constraints arrive as numbers or numeric strings.
fn length_attr(raw: &Value, attr: &str) -> Option<usize> {
    let value = raw.get(attr)?;
    value
        .as_u64()
        .map(|n| n as usize)
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

//! Resolves a field's choice source into an ordered (value, label) list.

use crate::host::{Host, Translation};
use crate::template::{ChoiceSource, FieldDef};
use crate::wizard::Choice;
use serde_json::Value;

/// The one preset collection this engine knows about.
const CATEGORIES_PRESET: &str = "categories";

/// Resolves the field's choice source. Only one source ever applies (the
/// template parse already picked the highest-priority non-empty one);
/// a source that yields nothing is not an error, just an empty list.
pub fn resolve(field: &FieldDef, user_id: i64, host: &Host) -> Vec<Choice> {
    match &field.choices {
        ChoiceSource::None => Vec::new(),

        ChoiceSource::Inline(defs) => defs
            .iter()
            .map(|def| Choice {
                value: def.value.clone(),
                label: def.label.clone(),
            })
            .collect(),

        ChoiceSource::Translation(key) => match host.translator.translate(key, &[]) {
            Translation::Map(pairs) => pairs
                .into_iter()
                .map(|(value, label)| Choice {
                    value: Value::String(value),
                    label,
                })
                .collect(),
            // Any other translation shape yields no choices.
            _ => Vec::new(),
        },

        ChoiceSource::Preset { name, filters } => {
            let objects = match name.as_str() {
                CATEGORIES_PRESET => host.categories.categories(user_id),
                _ => Vec::new(),
            };

            objects
                .into_iter()
                .filter(|category| {
                    filters
                        .iter()
                        .all(|f| category.get(&f.key).as_ref() == Some(&f.value))
                })
                .map(|category| Choice {
                    value: Value::from(category.id),
                    label: category.name,
                })
                .collect()
        }
    }
}

use serde_json::Value;

/// The complete, immutable definition of a wizard, ready for construction.
/// This is the target structure produced by [`WizardTemplate::from_value`]
/// from the host's loosely-typed template tree.
///
/// [`WizardTemplate::from_value`]: crate::template::WizardTemplate::from_value
#[derive(Debug, Clone, Default)]
pub struct WizardTemplate {
    pub id: String,
    pub name: Option<String>,
    pub background: Option<String>,
    pub save_submissions: bool,
    pub multiple_submissions: bool,
    pub steps: Vec<StepDef>,
}

/// Defines a single step (one page of the wizard). A step with no fields
/// is valid; it carries only actions.
#[derive(Debug, Clone, Default)]
pub struct StepDef {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub key: Option<String>,
    pub fields: Vec<FieldDef>,
    pub actions: Vec<ActionDef>,
}

/// Defines a single data-entry field on a step.
///
/// `field_type` is free-form; only `"dropdown"` carries special meaning
/// (it is the one type whose choice source is resolved).
#[derive(Debug, Clone, Default)]
pub struct FieldDef {
    pub id: String,
    pub field_type: String,
    pub required: bool,
    pub label: Option<String>,
    pub description: Option<String>,
    pub key: Option<String>,
    /// Minimum input length in characters. Applies to string input only.
    pub min_length: Option<usize>,
    pub choices: ChoiceSource,
}

/// The mechanism by which a dropdown's options are produced. Exactly one
/// source applies per field; sources are never merged.
#[derive(Debug, Clone, Default)]
pub enum ChoiceSource {
    #[default]
    None,
    /// Verbatim (value, label) pairs, order preserved.
    Inline(Vec<ChoiceDef>),
    /// A localization key whose translation is a flat key -> label map.
    Translation(String),
    /// A named host collection with conjunctive equality filters.
    Preset {
        name: String,
        filters: Vec<ChoiceFilter>,
    },
}

/// One statically defined dropdown option.
#[derive(Debug, Clone)]
pub struct ChoiceDef {
    pub value: Value,
    pub label: String,
}

/// An equality predicate applied to preset objects: keep the object iff
/// `object[key] == value`.
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
    pub key: String,
    pub value: Value,
}

/// A configured side-effecting operation triggered on successful step
/// submission. Unknown action type tags are dropped at parse time, so the
/// executor can match exhaustively.
#[derive(Debug, Clone)]
pub enum ActionDef {
    CreateTopic {
        /// Source field whose value becomes the topic title.
        title_field: String,
        /// Source field whose value becomes the raw body.
        body_field: Option<String>,
        category_id: Option<i64>,
        /// Supplemental (destination key, source field) attributes.
        add_fields: Vec<FieldMapping>,
    },
    SendMessage {
        title_field: String,
        body_field: String,
        target_usernames: Vec<String>,
    },
    UpdateProfile {
        updates: Vec<FieldMapping>,
    },
}

/// Maps a destination key to a source-field reference in the submission
/// data. Destination keys of the form `<scope>.custom_fields.<name>` route
/// into a scope-specific custom-field map instead of a top-level attribute.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    pub key: String,
    pub source: String,
}

use thiserror::Error;

/// Errors that can occur while parsing a wizard template tree.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Template for wizard '{wizard_id}' is not an object")]
    NotAnObject { wizard_id: String },

    #[error("Step at index {index} in wizard '{wizard_id}' is missing an id")]
    MissingStepId { wizard_id: String, index: usize },

    #[error("A field in step '{step_id}' is missing an id")]
    MissingFieldId { step_id: String },
}

/// Errors surfaced by the host's submission store.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Failed to persist submissions for wizard '{wizard_id}': {message}")]
    SaveFailed { wizard_id: String, message: String },
}

/// Errors that can occur when submitting a step to a live wizard.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Wizard '{wizard_id}' has no step '{step_id}'")]
    UnknownStep { wizard_id: String, step_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the process-wide handler registry.
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    #[error("The step handler registry has already been installed")]
    AlreadyInstalled,
}

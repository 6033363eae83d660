//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and traits so embedding code
//! can pull in the whole surface with one `use annai::prelude::*;`.

// Orchestration and live wizard types
pub use crate::builder::WizardBuilder;
pub use crate::wizard::{Choice, Field, Step, Wizard};

// Template model
pub use crate::template::{
    ActionDef, ChoiceDef, ChoiceFilter, ChoiceSource, FieldDef, FieldMapping, StepDef,
    WizardTemplate,
};

// Submissions
pub use crate::submission::{Submission, SubmissionHistory};

// Update processing
pub use crate::registry::{HandlerRegistry, RegistryBuilder};
pub use crate::update::{UpdateOutcome, Updater};

// Host collaborator contracts
pub use crate::host::{
    Archetype, Category, CategoryProvider, ContentCreator, ContentOutcome, CreatedContent, Host,
    NewContent, ProfileUpdater, SubmissionStore, TemplateSource, Translation, Translator,
};

// Error types
pub use crate::error::{RegistryError, StoreError, SubmitError, TemplateError};

// Map type used for step input and submission values
pub use ahash::AHashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

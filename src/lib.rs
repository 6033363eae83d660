//! # Annai - Declarative Wizard Construction and Submission Engine
//!
//! **Annai** builds multi-step, user-facing wizards at runtime from a
//! declarative template, tracks each user's in-progress and historical
//! submissions, validates and reacts to every step's input, and triggers
//! side-effecting actions (content creation, messaging, profile updates)
//! from the accumulated answers.
//!
//! ## Core Workflow
//!
//! The engine is host-agnostic. Everything it needs from the surrounding
//! platform is reached through the trait seams in [`host`]:
//!
//! 1.  **Implement the host traits**: template storage, submission
//!     persistence, localization, category enumeration, content creation
//!     and profile updates, bundled into a [`host::Host`].
//! 2.  **Register extension handlers** (optional): during initialization,
//!     freeze per-wizard callbacks into a [`registry::HandlerRegistry`]
//!     snapshot and install it process-wide.
//! 3.  **Build**: [`builder::WizardBuilder`] loads the template and the
//!     user's submission history and materializes the live wizard with
//!     resolved choice lists and prefilled draft values.
//! 4.  **Submit**: [`wizard::Wizard::submit`] runs one step's input
//!     through the update pipeline (validation, handlers, actions,
//!     persistence) and returns the [`update::Updater`] with accumulated
//!     errors and any result payload.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use annai::prelude::*;
//! use serde_json::{json, Value};
//!
//! // A minimal host: one hardcoded template, no persistence, no
//! // localization, no content subsystem.
//! struct DemoHost;
//!
//! impl TemplateSource for DemoHost {
//!     fn load(&self, _wizard_id: &str) -> Option<Value> {
//!         Some(json!({
//!             "name": "Welcome",
//!             "save_submissions": true,
//!             "steps": [{
//!                 "id": "intro",
//!                 "fields": [{ "id": "name", "type": "text", "min_length": 2 }]
//!             }]
//!         }))
//!     }
//! }
//!
//! impl SubmissionStore for DemoHost {
//!     fn load(&self, _wizard_id: &str, _user_id: i64) -> Vec<Submission> {
//!         Vec::new()
//!     }
//!     fn save(
//!         &self,
//!         _wizard_id: &str,
//!         _user_id: i64,
//!         _history: &[Submission],
//!     ) -> std::result::Result<(), StoreError> {
//!         Ok(())
//!     }
//! }
//!
//! impl CategoryProvider for DemoHost {
//!     fn categories(&self, _user_id: i64) -> Vec<Category> {
//!         Vec::new()
//!     }
//! }
//!
//! impl Translator for DemoHost {
//!     fn translate(&self, _key: &str, _params: &[(&str, &str)]) -> Translation {
//!         Translation::Missing
//!     }
//! }
//!
//! impl ContentCreator for DemoHost {
//!     fn create(&self, _user_id: i64, _content: NewContent) -> ContentOutcome {
//!         ContentOutcome::default()
//!     }
//! }
//!
//! impl ProfileUpdater for DemoHost {
//!     fn update(&self, _user_id: i64, _attributes: &[(String, Value)]) {}
//! }
//!
//! fn main() -> Result<()> {
//!     let host = Host {
//!         templates: Box::new(DemoHost),
//!         store: Box::new(DemoHost),
//!         categories: Box::new(DemoHost),
//!         translator: Box::new(DemoHost),
//!         content: Box::new(DemoHost),
//!         profiles: Box::new(DemoHost),
//!     };
//!
//!     let mut wizard = WizardBuilder::new(&host)
//!         .build("welcome", 42)?
//!         .expect("template exists");
//!
//!     let mut input = AHashMap::new();
//!     input.insert("name".to_string(), json!("Ada"));
//!
//!     let updater = wizard.submit("intro", input, &host)?;
//!     assert!(updater.success());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod choices;
pub mod error;
pub mod host;
pub mod prelude;
pub mod registry;
pub mod submission;
pub mod template;
pub mod update;
pub mod wizard;

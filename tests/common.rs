//! Common test fixtures: in-memory host collaborators and input helpers.
#![allow(dead_code)]

use annai::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Template source backed by a plain map.
#[derive(Default, Clone)]
pub struct FakeTemplates {
    templates: Arc<Mutex<HashMap<String, Value>>>,
}

impl FakeTemplates {
    pub fn insert(&self, wizard_id: &str, template: Value) {
        self.templates
            .lock()
            .unwrap()
            .insert(wizard_id.to_string(), template);
    }
}

impl TemplateSource for FakeTemplates {
    fn load(&self, wizard_id: &str) -> Option<Value> {
        self.templates.lock().unwrap().get(wizard_id).cloned()
    }
}

/// In-memory submission store that records every save.
#[derive(Default, Clone)]
pub struct MemoryStore {
    histories: Arc<Mutex<HashMap<(String, i64), Vec<Submission>>>>,
    save_count: Arc<Mutex<usize>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn seed(&self, wizard_id: &str, user_id: i64, history: Vec<Submission>) {
        self.histories
            .lock()
            .unwrap()
            .insert((wizard_id.to_string(), user_id), history);
    }

    pub fn history(&self, wizard_id: &str, user_id: i64) -> Vec<Submission> {
        self.histories
            .lock()
            .unwrap()
            .get(&(wizard_id.to_string(), user_id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }

    pub fn fail_next_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }
}

impl SubmissionStore for MemoryStore {
    fn load(&self, wizard_id: &str, user_id: i64) -> Vec<Submission> {
        self.history(wizard_id, user_id)
    }

    fn save(
        &self,
        wizard_id: &str,
        user_id: i64,
        history: &[Submission],
    ) -> std::result::Result<(), StoreError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(StoreError::SaveFailed {
                wizard_id: wizard_id.to_string(),
                message: "store offline".to_string(),
            });
        }
        *self.save_count.lock().unwrap() += 1;
        self.histories
            .lock()
            .unwrap()
            .insert((wizard_id.to_string(), user_id), history.to_vec());
        Ok(())
    }
}

/// Category provider returning a configured list.
#[derive(Default, Clone)]
pub struct FakeCategories {
    list: Arc<Mutex<Vec<Category>>>,
}

impl FakeCategories {
    pub fn set(&self, categories: Vec<Category>) {
        *self.list.lock().unwrap() = categories;
    }
}

impl CategoryProvider for FakeCategories {
    fn categories(&self, _user_id: i64) -> Vec<Category> {
        self.list.lock().unwrap().clone()
    }
}

/// Translator with configurable text and map translations. Text entries
/// support `%{name}` interpolation from the params.
#[derive(Default, Clone)]
pub struct FakeTranslator {
    texts: Arc<Mutex<HashMap<String, String>>>,
    maps: Arc<Mutex<HashMap<String, Vec<(String, String)>>>>,
}

impl FakeTranslator {
    pub fn add_text(&self, key: &str, text: &str) {
        self.texts
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
    }

    pub fn add_map(&self, key: &str, entries: Vec<(&str, &str)>) {
        self.maps.lock().unwrap().insert(
            key.to_string(),
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }
}

impl Translator for FakeTranslator {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> Translation {
        if let Some(text) = self.texts.lock().unwrap().get(key) {
            let mut rendered = text.clone();
            for (name, value) in params {
                rendered = rendered.replace(&format!("%{{{name}}}"), value);
            }
            return Translation::Text(rendered);
        }
        if let Some(entries) = self.maps.lock().unwrap().get(key) {
            return Translation::Map(entries.clone());
        }
        Translation::Missing
    }
}

/// Content creator recording every call; succeeds with a fixed created
/// content unless failure messages are configured.
#[derive(Default, Clone)]
pub struct RecordingCreator {
    calls: Arc<Mutex<Vec<(i64, NewContent)>>>,
    container_fields: Arc<Mutex<Vec<(i64, Vec<(String, Value)>)>>>,
    fail_with: Arc<Mutex<Option<Vec<String>>>>,
}

pub const CREATED_POST_ID: i64 = 88;
pub const CREATED_CONTAINER_ID: i64 = 99;

impl RecordingCreator {
    pub fn fail_with(&self, messages: Vec<&str>) {
        *self.fail_with.lock().unwrap() =
            Some(messages.into_iter().map(str::to_string).collect());
    }

    pub fn calls(&self) -> Vec<(i64, NewContent)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn container_fields(&self) -> Vec<(i64, Vec<(String, Value)>)> {
        self.container_fields.lock().unwrap().clone()
    }
}

impl ContentCreator for RecordingCreator {
    fn create(&self, user_id: i64, content: NewContent) -> ContentOutcome {
        self.calls.lock().unwrap().push((user_id, content));
        if let Some(errors) = self.fail_with.lock().unwrap().clone() {
            return ContentOutcome {
                errors,
                created: None,
            };
        }
        ContentOutcome {
            errors: Vec::new(),
            created: Some(CreatedContent {
                id: CREATED_POST_ID,
                container_id: CREATED_CONTAINER_ID,
            }),
        }
    }

    fn apply_container_fields(&self, container_id: i64, fields: &[(String, Value)]) {
        self.container_fields
            .lock()
            .unwrap()
            .push((container_id, fields.to_vec()));
    }
}

/// Profile updater recording every call.
#[derive(Default, Clone)]
pub struct RecordingProfiles {
    calls: Arc<Mutex<Vec<(i64, Vec<(String, Value)>)>>>,
}

impl RecordingProfiles {
    pub fn calls(&self) -> Vec<(i64, Vec<(String, Value)>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProfileUpdater for RecordingProfiles {
    fn update(&self, user_id: i64, attributes: &[(String, Value)]) {
        self.calls
            .lock()
            .unwrap()
            .push((user_id, attributes.to_vec()));
    }
}

/// One bundle of fakes plus a `Host` view over them. The fakes share
/// state through `Arc`, so tests keep their handles for inspection.
#[derive(Default)]
pub struct Fixture {
    pub templates: FakeTemplates,
    pub store: MemoryStore,
    pub categories: FakeCategories,
    pub translator: FakeTranslator,
    pub creator: RecordingCreator,
    pub profiles: RecordingProfiles,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(&self) -> Host {
        Host {
            templates: Box::new(self.templates.clone()),
            store: Box::new(self.store.clone()),
            categories: Box::new(self.categories.clone()),
            translator: Box::new(self.translator.clone()),
            content: Box::new(self.creator.clone()),
            profiles: Box::new(self.profiles.clone()),
        }
    }
}

/// Builds a step input map from (field id, value) pairs.
#[allow(dead_code)]
pub fn input(pairs: &[(&str, Value)]) -> AHashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Builds a submission from (key, value) pairs.
#[allow(dead_code)]
pub fn submission(pairs: &[(&str, Value)]) -> Submission {
    let mut s = Submission::new();
    for (k, v) in pairs {
        s.insert(k.to_string(), v.clone());
    }
    s
}

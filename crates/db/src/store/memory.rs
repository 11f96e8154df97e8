use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use dockyard_core::template::Template;
use dockyard_core::types::DbId;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::store::{StoreError, TemplateStore};

/// In-process [`TemplateStore`].
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Contents are lost on restart.
#[derive(Debug)]
pub struct MemoryTemplateStore {
    templates: RwLock<HashMap<DbId, Template>>,
}

/// Accepted layouts of a templates file: a bare array, or the versioned
/// `{ "version": "2", "templates": [...] }` document.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplatesFile {
    List(Vec<serde_json::Value>),
    Versioned { templates: Vec<serde_json::Value> },
}

impl MemoryTemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store holding `templates`, keyed by their IDs.
    pub fn with_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            templates: RwLock::new(templates.into_iter().map(|t| (t.id, t)).collect()),
        }
    }

    /// Parse a templates document.
    ///
    /// Entries without an `id` are numbered by position, starting at 1.
    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        let file: TemplatesFile = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::Storage(format!("invalid templates file: {e}")))?;
        let entries = match file {
            TemplatesFile::List(entries) | TemplatesFile::Versioned { templates: entries } => {
                entries
            }
        };

        let mut templates = Vec::with_capacity(entries.len());
        for (index, mut entry) in entries.into_iter().enumerate() {
            if let Some(obj) = entry.as_object_mut() {
                obj.entry("id").or_insert_with(|| (index as DbId + 1).into());
            }
            let template: Template = serde_json::from_value(entry).map_err(|e| {
                StoreError::Storage(format!("invalid template at index {index}: {e}"))
            })?;
            templates.push(template);
        }

        Ok(Self::with_templates(templates))
    }

    /// Read and parse a templates file from disk. See [`from_json`](Self::from_json).
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            StoreError::Storage(format!("cannot read templates file {}: {e}", path.display()))
        })?;
        let store = Self::from_json(&bytes)?;
        let count = store.len().await;
        tracing::info!(path = %path.display(), count, "Loaded templates file");
        Ok(store)
    }

    /// Insert or replace a template.
    pub async fn insert(&self, template: Template) {
        self.templates.write().await.insert(template.id, template);
    }

    /// Number of templates held.
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

impl Default for MemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn fetch(&self, id: DbId) -> Result<Template, StoreError> {
        self.templates
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn store(&self, template: &Template) -> Result<(), StoreError> {
        let mut templates = self.templates.write().await;
        match templates.get_mut(&template.id) {
            Some(existing) => {
                *existing = template.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(template.id)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

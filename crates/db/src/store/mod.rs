//! The template store boundary.
//!
//! Handlers load a template with [`TemplateStore::fetch`], merge the update
//! in memory and write it back with [`TemplateStore::store`]. There is no
//! version check between the two calls: concurrent updates to the same
//! template race and the last write wins.

use async_trait::async_trait;
use dockyard_core::template::Template;
use dockyard_core::types::DbId;

pub mod memory;
pub mod postgres;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Template {0} not found")]
    NotFound(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Load a fully populated template.
    async fn fetch(&self, id: DbId) -> Result<Template, StoreError>;

    /// Persist `template`, replacing the stored record with the same ID.
    ///
    /// The write is atomic for that single record. Fails with
    /// [`StoreError::NotFound`] if the record no longer exists.
    async fn store(&self, template: &Template) -> Result<(), StoreError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

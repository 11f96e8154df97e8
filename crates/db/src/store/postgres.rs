use async_trait::async_trait;
use dockyard_core::template::Template;
use dockyard_core::types::DbId;

use crate::repositories::TemplateRepo;
use crate::store::{StoreError, TemplateStore};
use crate::DbPool;

/// [`TemplateStore`] backed by the `templates` table.
#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn fetch(&self, id: DbId) -> Result<Template, StoreError> {
        TemplateRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound(id))?
            .into_template()
    }

    async fn store(&self, template: &Template) -> Result<(), StoreError> {
        if TemplateRepo::update(&self.pool, template).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(template.id))
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

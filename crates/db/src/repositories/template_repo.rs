//! Repository for the `templates` table.

use dockyard_core::template::Template;
use dockyard_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::TemplateRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, template_type, title, description, name, logo, note, platform, \
    categories, env, image, command, network, volumes, ports, labels, privileged, \
    interactive, restart_policy, hostname, repository_url, repository_stackfile";

/// Provides read and write access to templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Find a template by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every column of the template row in a single statement.
    ///
    /// Returns `false` if no row with `template.id` exists.
    pub async fn update(pool: &PgPool, template: &Template) -> Result<bool, sqlx::Error> {
        let row = TemplateRow::from(template);
        let result = sqlx::query(
            "UPDATE templates SET
                template_type = $2,
                title = $3,
                description = $4,
                name = $5,
                logo = $6,
                note = $7,
                platform = $8,
                categories = $9,
                env = $10,
                image = $11,
                command = $12,
                network = $13,
                volumes = $14,
                ports = $15,
                labels = $16,
                privileged = $17,
                interactive = $18,
                restart_policy = $19,
                hostname = $20,
                repository_url = $21,
                repository_stackfile = $22,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(row.id)
        .bind(&row.template_type)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.name)
        .bind(&row.logo)
        .bind(&row.note)
        .bind(&row.platform)
        .bind(&row.categories)
        .bind(&row.env)
        .bind(&row.image)
        .bind(&row.command)
        .bind(&row.network)
        .bind(&row.volumes)
        .bind(&row.ports)
        .bind(&row.labels)
        .bind(row.privileged)
        .bind(row.interactive)
        .bind(&row.restart_policy)
        .bind(&row.hostname)
        .bind(&row.repository_url)
        .bind(&row.repository_stackfile)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

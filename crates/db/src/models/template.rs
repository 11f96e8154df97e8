//! Row mapping for the `templates` table.

use dockyard_core::template::{
    ContainerSpec, Pair, StackSpec, Template, TemplateEnv, TemplateKind, TemplateRepository,
    TemplateType, TemplateVolume,
};
use dockyard_core::types::DbId;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::store::StoreError;

/// A row from the `templates` table.
///
/// The table is flat: container columns are NULL on stack rows and the
/// repository columns are NULL on container rows.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: DbId,
    pub template_type: String,
    pub title: String,
    pub description: String,
    pub name: String,
    pub logo: String,
    pub note: String,
    pub platform: String,
    pub categories: Json<Vec<String>>,
    pub env: Json<Vec<TemplateEnv>>,
    // -- Container --
    pub image: Option<String>,
    pub command: Option<String>,
    pub network: Option<String>,
    pub volumes: Option<Json<Vec<TemplateVolume>>>,
    pub ports: Option<Json<Vec<String>>>,
    pub labels: Option<Json<Vec<Pair>>>,
    pub privileged: Option<bool>,
    pub interactive: Option<bool>,
    pub restart_policy: Option<String>,
    pub hostname: Option<String>,
    // -- Stack --
    pub repository_url: Option<String>,
    pub repository_stackfile: Option<String>,
}

impl TemplateRow {
    /// Convert into the domain model.
    ///
    /// Fails with [`StoreError::Storage`] if `template_type` holds a value
    /// the domain does not know.
    pub fn into_template(self) -> Result<Template, StoreError> {
        let template_type: TemplateType = self.template_type.parse().map_err(|_| {
            StoreError::Storage(format!(
                "template {} has unknown type '{}'",
                self.id, self.template_type
            ))
        })?;

        let kind = match template_type {
            TemplateType::Container => TemplateKind::Container(ContainerSpec {
                image: self.image.unwrap_or_default(),
                command: self.command.unwrap_or_default(),
                network: self.network.unwrap_or_default(),
                volumes: self.volumes.map(|v| v.0).unwrap_or_default(),
                ports: self.ports.map(|v| v.0).unwrap_or_default(),
                labels: self.labels.map(|v| v.0).unwrap_or_default(),
                privileged: self.privileged.unwrap_or_default(),
                interactive: self.interactive.unwrap_or_default(),
                restart_policy: self.restart_policy.unwrap_or_default(),
                hostname: self.hostname.unwrap_or_default(),
            }),
            TemplateType::Stack => TemplateKind::Stack(StackSpec {
                repository: TemplateRepository {
                    url: self.repository_url.unwrap_or_default(),
                    stackfile: self.repository_stackfile.unwrap_or_default(),
                },
            }),
        };

        Ok(Template {
            id: self.id,
            kind,
            title: self.title,
            description: self.description,
            name: self.name,
            logo: self.logo,
            note: self.note,
            platform: self.platform,
            categories: self.categories.0,
            env: self.env.0,
        })
    }
}

impl From<&Template> for TemplateRow {
    fn from(template: &Template) -> Self {
        let mut row = TemplateRow {
            id: template.id,
            template_type: template.template_type().as_str().to_string(),
            title: template.title.clone(),
            description: template.description.clone(),
            name: template.name.clone(),
            logo: template.logo.clone(),
            note: template.note.clone(),
            platform: template.platform.clone(),
            categories: Json(template.categories.clone()),
            env: Json(template.env.clone()),
            image: None,
            command: None,
            network: None,
            volumes: None,
            ports: None,
            labels: None,
            privileged: None,
            interactive: None,
            restart_policy: None,
            hostname: None,
            repository_url: None,
            repository_stackfile: None,
        };

        match &template.kind {
            TemplateKind::Container(spec) => {
                row.image = Some(spec.image.clone());
                row.command = Some(spec.command.clone());
                row.network = Some(spec.network.clone());
                row.volumes = Some(Json(spec.volumes.clone()));
                row.ports = Some(Json(spec.ports.clone()));
                row.labels = Some(Json(spec.labels.clone()));
                row.privileged = Some(spec.privileged);
                row.interactive = Some(spec.interactive);
                row.restart_policy = Some(spec.restart_policy.clone());
                row.hostname = Some(spec.hostname.clone());
            }
            TemplateKind::Stack(spec) => {
                row.repository_url = Some(spec.repository.url.clone());
                row.repository_stackfile = Some(spec.repository.stackfile.clone());
            }
        }

        row
    }
}

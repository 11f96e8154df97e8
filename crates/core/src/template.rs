//! Template record model.
//!
//! A [`Template`] carries descriptive fields shared by every template plus a
//! [`TemplateKind`] holding the fields of exactly one subtype. On the wire the
//! variant is flattened into the record and selected by the `type` key:
//!
//! ```json
//! { "id": 1, "type": "container", "title": "Nginx", "image": "nginx:latest", ... }
//! { "id": 2, "type": "stack", "title": "Wordpress", "repository": { "url": "...", "stackfile": "..." } }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
   Discriminant
   -------------------------------------------------------------------------- */

pub const TYPE_CONTAINER: &str = "container";
pub const TYPE_STACK: &str = "stack";

/// All valid `type` values.
pub const VALID_TYPES: &[&str] = &[TYPE_CONTAINER, TYPE_STACK];

/// Message returned when a payload carries an unknown `type`.
pub const INVALID_TYPE_MESSAGE: &str =
    "Invalid template type. Valid values are: container or stack.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Container,
    Stack,
}

impl TemplateType {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::Container => TYPE_CONTAINER,
            TemplateType::Stack => TYPE_STACK,
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TYPE_CONTAINER => Ok(TemplateType::Container),
            TYPE_STACK => Ok(TemplateType::Stack),
            _ => Err(CoreError::Validation(INVALID_TYPE_MESSAGE.to_string())),
        }
    }
}

/* --------------------------------------------------------------------------
   Nested value types
   -------------------------------------------------------------------------- */

/// An environment variable a user fills in when deploying the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateEnv {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    /// Hidden from the user and always set to `default`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub preset: bool,
    /// Fixed choices; when non-empty the variable renders as a dropdown.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<TemplateEnvSelect>,
}

/// One choice of a [`TemplateEnv`] dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateEnvSelect {
    pub text: String,
    pub value: String,
    pub default: bool,
}

/// A volume mounted into a container template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateVolume {
    /// Path inside the container.
    pub container: String,
    /// Host path; empty means a named volume is created.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bind: String,
    pub readonly: bool,
}

/// A name/value pair, used for container labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pair {
    pub name: String,
    pub value: String,
}

/// Location of a stack definition in a git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRepository {
    pub url: String,
    /// Path of the compose file inside the repository.
    pub stackfile: String,
}

impl TemplateRepository {
    /// Both `url` and `stackfile` are set.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.stackfile.is_empty()
    }
}

/* --------------------------------------------------------------------------
   Subtype fields
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub image: String,
    pub command: String,
    pub network: String,
    pub volumes: Vec<TemplateVolume>,
    /// Published ports, e.g. `"8080:80/tcp"`.
    pub ports: Vec<String>,
    pub labels: Vec<Pair>,
    pub privileged: bool,
    pub interactive: bool,
    pub restart_policy: String,
    pub hostname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    pub repository: TemplateRepository,
}

/// Subtype-specific fields, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateKind {
    Container(ContainerSpec),
    Stack(StackSpec),
}

impl TemplateKind {
    /// A variant of the given type with every field at its zero value.
    pub fn empty(template_type: TemplateType) -> Self {
        match template_type {
            TemplateType::Container => TemplateKind::Container(ContainerSpec::default()),
            TemplateType::Stack => TemplateKind::Stack(StackSpec::default()),
        }
    }

    pub fn template_type(&self) -> TemplateType {
        match self {
            TemplateKind::Container(_) => TemplateType::Container,
            TemplateKind::Stack(_) => TemplateType::Stack,
        }
    }
}

/* --------------------------------------------------------------------------
   Template
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: DbId,
    #[serde(flatten)]
    pub kind: TemplateKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Default name for the deployed container or stack.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub note: String,
    /// Target platform, e.g. `linux` or `windows`.
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub env: Vec<TemplateEnv>,
}

impl Template {
    /// A template of the given type with empty descriptive fields.
    pub fn new(id: DbId, template_type: TemplateType) -> Self {
        Self {
            id,
            kind: TemplateKind::empty(template_type),
            title: String::new(),
            description: String::new(),
            name: String::new(),
            logo: String::new(),
            note: String::new(),
            platform: String::new(),
            categories: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn template_type(&self) -> TemplateType {
        self.kind.template_type()
    }

    /// Switch the template to `template_type`.
    ///
    /// Changing the type discards the fields of the former subtype; setting
    /// the current type is a no-op.
    pub fn set_type(&mut self, template_type: TemplateType) {
        if self.template_type() != template_type {
            self.kind = TemplateKind::empty(template_type);
        }
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn template_type_parses_known_values() {
        assert_eq!(
            "container".parse::<TemplateType>().unwrap(),
            TemplateType::Container
        );
        assert_eq!("stack".parse::<TemplateType>().unwrap(), TemplateType::Stack);
    }

    #[test]
    fn template_type_rejects_unknown_values() {
        let err = "Container".parse::<TemplateType>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_TYPE_MESSAGE);
        assert!("".parse::<TemplateType>().is_err());
    }

    #[test]
    fn container_template_serializes_flat() {
        let mut template = Template::new(7, TemplateType::Container);
        template.title = "Nginx".into();
        if let TemplateKind::Container(spec) = &mut template.kind {
            spec.image = "nginx:latest".into();
            spec.ports = vec!["80/tcp".into()];
        }

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "container");
        assert_eq!(value["title"], "Nginx");
        assert_eq!(value["image"], "nginx:latest");
        assert_eq!(value["ports"], json!(["80/tcp"]));
        assert!(value.get("repository").is_none());
    }

    #[test]
    fn stack_template_serializes_repository() {
        let mut template = Template::new(3, TemplateType::Stack);
        template.kind = TemplateKind::Stack(StackSpec {
            repository: TemplateRepository {
                url: "https://github.com/acme/stacks".into(),
                stackfile: "wordpress/docker-compose.yml".into(),
            },
        });

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["type"], "stack");
        assert_eq!(value["repository"]["url"], "https://github.com/acme/stacks");
        assert_eq!(
            value["repository"]["stackfile"],
            "wordpress/docker-compose.yml"
        );
        assert!(value.get("image").is_none());
    }

    #[test]
    fn template_deserializes_with_missing_fields() {
        let template: Template = serde_json::from_value(json!({
            "id": 4,
            "type": "container",
            "title": "Redis",
            "image": "redis:7",
            "privileged": true
        }))
        .unwrap();

        assert_eq!(template.title, "Redis");
        assert!(template.categories.is_empty());
        assert_matches!(
            &template.kind,
            TemplateKind::Container(spec) if spec.image == "redis:7" && spec.privileged
        );
    }

    #[test]
    fn template_with_unknown_type_fails_to_deserialize() {
        let result: Result<Template, _> =
            serde_json::from_value(json!({"id": 1, "type": "banana"}));
        assert!(result.is_err());
    }

    #[test]
    fn set_type_resets_fields_only_on_change() {
        let mut template = Template::new(1, TemplateType::Container);
        if let TemplateKind::Container(spec) = &mut template.kind {
            spec.image = "nginx".into();
        }

        template.set_type(TemplateType::Container);
        assert_matches!(&template.kind, TemplateKind::Container(spec) if spec.image == "nginx");

        template.set_type(TemplateType::Stack);
        assert_eq!(template.kind, TemplateKind::Stack(StackSpec::default()));
    }

    #[test]
    fn repository_completeness_requires_both_parts() {
        let mut repo = TemplateRepository {
            url: "https://example.com/repo".into(),
            stackfile: String::new(),
        };
        assert!(!repo.is_complete());
        repo.stackfile = "stack.yml".into();
        assert!(repo.is_complete());
    }

    #[test]
    fn env_omits_empty_optional_fields() {
        let env = TemplateEnv {
            name: "MYSQL_ROOT_PASSWORD".into(),
            label: "Root password".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({"name": "MYSQL_ROOT_PASSWORD", "label": "Root password"})
        );
    }
}

//! Template update payload: decoding, validation and merge.
//!
//! An update is processed in three steps:
//!
//! 1. [`decode_update`] turns the raw request body into an [`UpdateTemplate`]
//!    and validates it. Nothing is mutated if this fails.
//! 2. [`UpdateTemplate::apply`] writes every supplied common field onto the
//!    loaded [`Template`], including `type`.
//! 3. Still inside `apply`, the subtype fields are merged according to the
//!    template's type *after* step 2. When the payload changes the type, the
//!    fields it carries for the old type are dropped.
//!
//! Field names are matched case-insensitively, so `Hostname`, `hostname` and
//! `HOSTNAME` all address the same field, and `RestartPolicy` is accepted
//! alongside `restart_policy`. This applies at every nesting level
//! (`Repository.URL`, `Repository.StackFile`, ...).

use serde::Deserialize;

use crate::error::CoreError;
use crate::patch::{apply_list, null_as_default, Patch};
use crate::template::{
    ContainerSpec, Pair, StackSpec, Template, TemplateEnv, TemplateKind, TemplateRepository,
    TemplateType, TemplateVolume, INVALID_TYPE_MESSAGE,
};

/// Sparse update for a [`Template`]. Every field is optional.
///
/// Scalars are [`Patch`] values. Lists and `repository` are plain values
/// that only count as supplied when non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTemplate {
    /// Kept as a raw string so an unknown value surfaces as a validation
    /// error rather than a decode error.
    #[serde(rename = "type")]
    pub template_type: Patch<String>,
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub name: Patch<String>,
    pub logo: Patch<String>,
    pub note: Patch<String>,
    pub platform: Patch<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub env: Vec<TemplateEnv>,

    // -- Container --
    pub image: Patch<String>,
    pub command: Patch<String>,
    pub network: Patch<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<TemplateVolume>,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<Pair>,
    pub privileged: Patch<bool>,
    pub interactive: Patch<bool>,
    pub restart_policy: Patch<String>,
    pub hostname: Patch<String>,

    // -- Stack --
    #[serde(deserialize_with = "null_as_default")]
    pub repository: TemplateRepository,
}

/// Decode and validate a request body into an [`UpdateTemplate`].
///
/// Returns [`CoreError::InvalidPayload`] when the body is not a JSON object
/// of the expected shape and [`CoreError::Validation`] when it decodes but
/// fails [`UpdateTemplate::validate`].
pub fn decode_update(body: &[u8]) -> Result<UpdateTemplate, CoreError> {
    let mut value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::InvalidPayload(e.to_string()))?;

    if !value.is_object() {
        return Err(CoreError::InvalidPayload(
            "Request payload must be a JSON object".to_string(),
        ));
    }
    normalize_keys(&mut value);

    let update: UpdateTemplate =
        serde_json::from_value(value).map_err(|e| CoreError::InvalidPayload(e.to_string()))?;
    update.validate()?;
    Ok(update)
}

/// Rewrite every object key in `value` to the field name it addresses.
///
/// When two keys collapse onto the same field, the later one in map order wins.
fn normalize_keys(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            let entries = std::mem::take(map);
            for (key, mut child) in entries {
                normalize_keys(&mut child);
                map.insert(canonical_key(&key), child);
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(normalize_keys),
        _ => {}
    }
}

fn canonical_key(key: &str) -> String {
    let lower = key.to_ascii_lowercase();
    match lower.as_str() {
        "restartpolicy" => "restart_policy".to_string(),
        _ => lower,
    }
}

impl UpdateTemplate {
    /// Check the payload before it touches a record.
    ///
    /// The only rule: a supplied `type` must be `container` or `stack`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Patch::Present(template_type) = &self.template_type {
            if template_type.parse::<TemplateType>().is_err() {
                return Err(CoreError::Validation(INVALID_TYPE_MESSAGE.to_string()));
            }
        }
        Ok(())
    }

    /// Merge this update into `template`.
    ///
    /// Call [`validate`](Self::validate) first; an unknown `type` reaching
    /// this point is ignored and the current type kept.
    pub fn apply(self, template: &mut Template) {
        if let Patch::Present(raw) = &self.template_type {
            if let Ok(template_type) = raw.parse::<TemplateType>() {
                template.set_type(template_type);
            }
        }

        self.title.apply_to(&mut template.title);
        self.description.apply_to(&mut template.description);
        self.name.apply_to(&mut template.name);
        self.logo.apply_to(&mut template.logo);
        self.note.apply_to(&mut template.note);
        self.platform.apply_to(&mut template.platform);
        apply_list(&mut template.categories, self.categories);
        apply_list(&mut template.env, self.env);

        match &mut template.kind {
            TemplateKind::Container(spec) => merge_container(
                spec,
                ContainerUpdate {
                    image: self.image,
                    command: self.command,
                    network: self.network,
                    volumes: self.volumes,
                    ports: self.ports,
                    labels: self.labels,
                    privileged: self.privileged,
                    interactive: self.interactive,
                    restart_policy: self.restart_policy,
                    hostname: self.hostname,
                },
            ),
            TemplateKind::Stack(spec) => merge_stack(spec, self.repository),
        }
    }
}

/// Container fields split off an [`UpdateTemplate`] once `apply` has
/// consumed the common ones.
struct ContainerUpdate {
    image: Patch<String>,
    command: Patch<String>,
    network: Patch<String>,
    volumes: Vec<TemplateVolume>,
    ports: Vec<String>,
    labels: Vec<Pair>,
    privileged: Patch<bool>,
    interactive: Patch<bool>,
    restart_policy: Patch<String>,
    hostname: Patch<String>,
}

fn merge_container(spec: &mut ContainerSpec, update: ContainerUpdate) {
    update.image.apply_to(&mut spec.image);
    update.command.apply_to(&mut spec.command);
    update.network.apply_to(&mut spec.network);
    apply_list(&mut spec.volumes, update.volumes);
    apply_list(&mut spec.ports, update.ports);
    apply_list(&mut spec.labels, update.labels);
    update.privileged.apply_to(&mut spec.privileged);
    update.interactive.apply_to(&mut spec.interactive);
    update.restart_policy.apply_to(&mut spec.restart_policy);
    update.hostname.apply_to(&mut spec.hostname);
}

/// The repository is replaced as a unit, and only when both parts are set.
fn merge_stack(spec: &mut StackSpec, repository: TemplateRepository) {
    if repository.is_complete() {
        spec.repository = repository;
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

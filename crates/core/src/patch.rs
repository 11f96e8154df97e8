//! Absent/present wrapper for sparse update payloads.
//!
//! A [`Patch<T>`] field is either missing from the request document
//! ([`Patch::Absent`], leave the stored value alone) or supplied
//! ([`Patch::Present`], overwrite it). Unlike a bare `Option<T>`, the wrapper
//! keeps "not supplied" distinct from "supplied with the zero value": a
//! payload of `{"privileged": false}` is `Present(false)`.
//!
//! Use `#[serde(default)]` on the containing struct so missing keys decode as
//! `Absent`. A JSON `null` also decodes as `Absent`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied.
    Absent,
    /// The field was supplied with this value.
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Patch::Present(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Present(value) => Patch::Present(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Present(value) => Some(value),
        }
    }

    /// Overwrite `target` if a value was supplied.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Present(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Present(v),
            None => Patch::Absent,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Overwrite `target` with `values` unless `values` is empty.
///
/// List fields cannot tell an explicit `[]` apart from a missing key, so an
/// empty list never clears the stored one.
pub fn apply_list<T>(target: &mut Vec<T>, values: Vec<T>) {
    if !values.is_empty() {
        *target = values;
    }
}

/// Deserialize a plain field, mapping JSON `null` to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Domain logic for template merge-patching.
//!
//! Pure types and functions with no I/O: the template model, the
//! absent/present [`patch::Patch`] wrapper, and the update payload decoder,
//! validator and merge engine.

pub mod error;
pub mod patch;
pub mod template;
pub mod types;
pub mod update;

//! Request handlers.
//!
//! Handlers load and persist through the [`TemplateStore`] in
//! [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).
//!
//! [`TemplateStore`]: dockyard_db::TemplateStore

pub mod template;

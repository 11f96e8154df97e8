//! Repositories: static query functions grouped per table.

pub mod template_repo;

pub use template_repo::TemplateRepo;

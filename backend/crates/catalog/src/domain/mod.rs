//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    comment::{Author, Comment, CommentThread},
    resource::{Resource, ResourceDetails},
    transition::StatusTransition,
};
pub use repository::{
    AuthorDirectory, CatalogRepository, CommentRepository, EngagementRepository,
    ResourceRepository, ReviewRepository,
};
pub use value_object::{audit_status::AuditStatus, resource_kind::ResourceKind};

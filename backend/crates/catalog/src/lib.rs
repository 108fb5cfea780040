//! Catalog Backend Module
//!
//! Tools, courses and projects: browsing, submissions, engagement,
//! threaded comments, the user library and admin moderation.
//!
//! Clean Architecture structure:
//! - `domain/` - Resource and comment entities, listing rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Visibility
//! - New submissions start `pending`; only `approved` resources are listed
//!   and accept engagement
//! - Owners and admins can open a resource in any status

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::{
    AuditStatus, CatalogRepository, Comment, CommentThread, Resource, ResourceKind,
    StatusTransition,
};
pub use error::{CatalogError, CatalogResult};
pub use infra::{InMemoryCatalogRepository, PgCatalogRepository};
pub use presentation::{
    CatalogAppState, admin_router, courses_router, library_router, projects_router, tools_router,
};

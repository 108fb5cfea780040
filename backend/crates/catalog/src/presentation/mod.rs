//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{CatalogAppState, FamilyState};
pub use router::{admin_router, courses_router, library_router, projects_router, tools_router};

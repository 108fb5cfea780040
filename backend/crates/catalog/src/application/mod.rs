//! Application Layer
//!
//! Use cases over a [`CatalogRepository`](crate::domain::repository::CatalogRepository).

pub mod admin;
pub mod browse;
pub mod comments;
pub mod engagement;
pub mod library;
pub mod publish;
pub mod submission;

// Re-exports
pub use admin::{GetPendingUseCase, ItemRef, PendingPage, ReviewInput, ReviewItemUseCase};
pub use browse::{
    GetResourceUseCase, ListInput, ListResourcesUseCase, ResourceDetail, ResourceListing,
};
pub use comments::CommentUseCase;
pub use engagement::{EngagementUseCase, Reaction};
pub use library::LibraryUseCase;
pub use publish::{CourseMaterialUseCase, SubmitResourceUseCase, UpdateResourceUseCase};
pub use submission::{
    CoursePatch, CourseSubmission, MaterialUpload, ProjectPatch, ProjectSubmission, ResourcePatch,
    Submission, ToolSubmission,
};

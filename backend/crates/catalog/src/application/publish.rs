//! Publishing Use Cases
//!
//! Submissions, owner updates and course materials.

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{MaterialId, ResourceId};

use crate::application::browse::load_visible;
use crate::application::submission::{MaterialUpload, ResourcePatch, Submission};
use crate::domain::entity::resource::{Material, Resource, ResourceDetails};
use crate::domain::repository::CatalogRepository;
use crate::domain::value_object::resource_kind::ResourceKind;
use crate::error::{CatalogError, CatalogResult};

/// Submit use case; new resources always start pending
pub struct SubmitResourceUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitResourceUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: &CurrentUser, submission: Submission) -> CatalogResult<Resource> {
        let (content, details) = submission.into_parts()?;
        let resource = Resource::submit(owner, content, details);

        self.repo.create_resource(&resource).await?;

        tracing::info!(
            resource_id = %resource.resource_id,
            kind = %resource.kind(),
            owner = %owner.user_name,
            "Resource submitted"
        );

        Ok(resource)
    }
}

/// Owner update use case; audit status is kept
pub struct UpdateResourceUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateResourceUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        resource_id: &ResourceId,
        patch: ResourcePatch,
    ) -> CatalogResult<Resource> {
        let kind = patch.kind();
        let mut resource = load_visible(self.repo.as_ref(), kind, resource_id, Some(user)).await?;
        resource.ensure_owner(user)?;

        patch.apply(&mut resource)?;
        self.repo.update_resource(&resource).await?;

        tracing::info!(resource_id = %resource.resource_id, kind = %kind, "Resource updated");

        Ok(resource)
    }
}

/// Course material use cases
pub struct CourseMaterialUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> CourseMaterialUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Attach a material; the uploader becomes a contributor
    pub async fn upload(
        &self,
        user: &CurrentUser,
        course_id: &ResourceId,
        upload: MaterialUpload,
    ) -> CatalogResult<Material> {
        load_visible(self.repo.as_ref(), ResourceKind::Course, course_id, Some(user)).await?;
        let material = upload.into_material(&user.user_name)?;

        if !self.repo.append_material(course_id, &material).await? {
            return Err(CatalogError::ResourceNotFound(ResourceKind::Course));
        }

        tracing::info!(
            course_id = %course_id,
            material_id = %material.material_id,
            uploader = %user.user_name,
            "Course material uploaded"
        );

        Ok(material)
    }

    pub async fn download(
        &self,
        viewer: &CurrentUser,
        course_id: &ResourceId,
        material_id: &MaterialId,
    ) -> CatalogResult<Material> {
        let course =
            load_visible(self.repo.as_ref(), ResourceKind::Course, course_id, Some(viewer)).await?;

        match course.details {
            ResourceDetails::Course(details) => details
                .materials
                .into_iter()
                .find(|m| &m.material_id == material_id)
                .ok_or(CatalogError::MaterialNotFound),
            _ => Err(CatalogError::ResourceNotFound(ResourceKind::Course)),
        }
    }
}

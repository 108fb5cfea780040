//! Family-specific submission and update inputs
//!
//! Each input validates itself and produces the common
//! [`ResourceContent`] plus the family's [`ResourceDetails`].

use chrono::Utc;
use kernel::id::MaterialId;

use crate::domain::entity::resource::{
    CourseDetails, Material, ProjectDetails, Resource, ResourceContent, ResourceDetails,
    ToolDetails, clean_list,
};
use crate::domain::value_object::resource_kind::ResourceKind;
use crate::error::{CatalogError, CatalogResult};

pub const MAX_COURSE_CREDIT: u32 = 20;

fn required(value: String, field: &str) -> CatalogResult<String> {
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(CatalogError::invalid_input(format!("{field} is required")));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn require_url(value: String, field: &str) -> CatalogResult<String> {
    let value = required(value, field)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(CatalogError::InvalidInput {
            message: format!("{field} must be an http(s) URL"),
            action: Some("Include the http:// or https:// prefix".to_owned()),
        });
    }
    Ok(value)
}

fn check_credit(credit: u32) -> CatalogResult<u32> {
    if credit > MAX_COURSE_CREDIT {
        return Err(CatalogError::invalid_input(format!(
            "Credit must be at most {MAX_COURSE_CREDIT}"
        )));
    }
    Ok(credit)
}

// ============================================================================
// Submissions
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ToolSubmission {
    pub name: String,
    pub link: String,
    pub description: String,
    pub detail: String,
    pub category: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseSubmission {
    pub name: String,
    pub description: String,
    pub teachers: Vec<String>,
    pub category: String,
    pub semester: String,
    pub credit: u32,
    pub cover: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub name: String,
    pub description: String,
    pub detail: String,
    pub github: String,
    pub tech_stack: Vec<String>,
    pub category: String,
    pub images: Vec<String>,
}

/// New resource of any family
#[derive(Debug, Clone)]
pub enum Submission {
    Tool(ToolSubmission),
    Course(CourseSubmission),
    Project(ProjectSubmission),
}

impl Submission {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Submission::Tool(_) => ResourceKind::Tool,
            Submission::Course(_) => ResourceKind::Course,
            Submission::Project(_) => ResourceKind::Project,
        }
    }

    pub fn into_parts(self) -> CatalogResult<(ResourceContent, ResourceDetails)> {
        match self {
            Submission::Tool(tool) => {
                let link = require_url(tool.link, "Link")?;
                let content = ResourceContent {
                    name: tool.name,
                    description: tool.description,
                    category: required(tool.category, "Category")?,
                    tags: tool.tags,
                    images: tool.images,
                }
                .validated()?;
                if content.tags.is_empty() {
                    return Err(CatalogError::invalid_input("At least one tag is required"));
                }

                Ok((
                    content,
                    ResourceDetails::Tool(ToolDetails {
                        link,
                        detail: tool.detail.trim().to_owned(),
                    }),
                ))
            }
            Submission::Course(course) => {
                let semester = required(course.semester, "Semester")?;
                let content = ResourceContent {
                    name: course.name,
                    description: course.description,
                    category: required(course.category, "Category")?,
                    tags: course.tags,
                    images: course.cover.into_iter().collect(),
                }
                .validated()?;

                Ok((
                    content,
                    ResourceDetails::Course(CourseDetails {
                        teachers: clean_list(course.teachers),
                        semester,
                        credit: check_credit(course.credit)?,
                        materials: Vec::new(),
                    }),
                ))
            }
            Submission::Project(project) => {
                let github = optional(Some(project.github))
                    .map(|g| require_url(g, "GitHub URL"))
                    .transpose()?
                    .unwrap_or_default();
                let content = ResourceContent {
                    name: project.name,
                    description: project.description,
                    category: required(project.category, "Category")?,
                    tags: project.tech_stack,
                    images: project.images,
                }
                .validated()?;
                if content.tags.is_empty() {
                    return Err(CatalogError::invalid_input(
                        "At least one tech stack entry is required",
                    ));
                }

                Ok((
                    content,
                    ResourceDetails::Project(ProjectDetails {
                        detail: project.detail.trim().to_owned(),
                        github,
                    }),
                ))
            }
        }
    }
}

// ============================================================================
// Owner updates
// ============================================================================

/// Course update; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teachers: Option<Vec<String>>,
    pub category: Option<String>,
    pub semester: Option<String>,
    pub credit: Option<u32>,
    pub cover: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Project update; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub github: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub enum ResourcePatch {
    Course(CoursePatch),
    Project(ProjectPatch),
}

impl ResourcePatch {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePatch::Course(_) => ResourceKind::Course,
            ResourcePatch::Project(_) => ResourceKind::Project,
        }
    }

    /// Apply to `resource`, re-validating the merged content
    pub fn apply(self, resource: &mut Resource) -> CatalogResult<()> {
        let current = ResourceContent {
            name: resource.name.clone(),
            description: resource.description.clone(),
            category: resource.category.clone(),
            tags: resource.tags.clone(),
            images: resource.images.clone(),
        };

        match (self, &mut resource.details) {
            (ResourcePatch::Course(patch), ResourceDetails::Course(details)) => {
                let mut images = current.images;
                if let Some(cover) = optional(patch.cover) {
                    images.retain(|i| i != &cover);
                    images.insert(0, cover);
                }
                let content = ResourceContent {
                    name: optional(patch.name).unwrap_or(current.name),
                    description: patch.description.unwrap_or(current.description),
                    category: optional(patch.category).unwrap_or(current.category),
                    tags: patch.tags.unwrap_or(current.tags),
                    images,
                }
                .validated()?;

                let mut next = details.clone();
                if let Some(teachers) = patch.teachers {
                    next.teachers = clean_list(teachers);
                }
                if let Some(semester) = optional(patch.semester) {
                    next.semester = semester;
                }
                if let Some(credit) = patch.credit {
                    next.credit = check_credit(credit)?;
                }

                *details = next;
                resource.apply_content(content);
                Ok(())
            }
            (ResourcePatch::Project(patch), ResourceDetails::Project(details)) => {
                let content = ResourceContent {
                    name: optional(patch.name).unwrap_or(current.name),
                    description: patch.description.unwrap_or(current.description),
                    category: optional(patch.category).unwrap_or(current.category),
                    tags: patch.tech_stack.unwrap_or(current.tags),
                    images: patch.images.unwrap_or(current.images),
                }
                .validated()?;
                if content.tags.is_empty() {
                    return Err(CatalogError::invalid_input(
                        "At least one tech stack entry is required",
                    ));
                }

                let github = match patch.github {
                    Some(g) if g.trim().is_empty() => String::new(),
                    Some(g) => require_url(g, "GitHub URL")?,
                    None => details.github.clone(),
                };
                if let Some(detail) = patch.detail {
                    details.detail = detail.trim().to_owned();
                }
                details.github = github;

                resource.apply_content(content);
                Ok(())
            }
            (patch, _) => Err(CatalogError::ResourceNotFound(patch.kind())),
        }
    }
}

// ============================================================================
// Course materials
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MaterialUpload {
    pub introduction: String,
    pub url: Option<String>,
    /// Reference to an uploaded file
    pub file: Option<String>,
    pub tags: Vec<String>,
}

impl MaterialUpload {
    pub fn into_material(self, uploader: &str) -> CatalogResult<Material> {
        let url = optional(self.url);
        let file = optional(self.file);
        if url.is_none() && file.is_none() {
            return Err(CatalogError::InvalidInput {
                message: "A URL or an uploaded file is required".to_owned(),
                action: Some("Provide `resource` (link) or `file`".to_owned()),
            });
        }

        Ok(Material {
            material_id: MaterialId::new(),
            introduction: self.introduction.trim().to_owned(),
            url,
            file,
            tags: clean_list(self.tags),
            uploader: uploader.to_owned(),
            uploaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> ToolSubmission {
        ToolSubmission {
            name: "ripgrep".into(),
            link: "https://github.com/BurntSushi/ripgrep".into(),
            category: "cli".into(),
            tags: vec!["search".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_tool_requires_tag() {
        let mut submission = tool();
        submission.tags.clear();
        assert!(Submission::Tool(submission).into_parts().is_err());
        assert!(Submission::Tool(tool()).into_parts().is_ok());
    }

    #[test]
    fn test_tool_link_must_be_url() {
        let mut submission = tool();
        submission.link = "ftp://example.com".into();
        let err = Submission::Tool(submission).into_parts().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { .. }));
    }

    #[test]
    fn test_course_cover_becomes_first_image() {
        let (content, details) = Submission::Course(CourseSubmission {
            name: "Compilers".into(),
            category: "cs".into(),
            semester: "2024-spring".into(),
            credit: 3,
            cover: Some("cover.png".into()),
            ..Default::default()
        })
        .into_parts()
        .unwrap();

        assert_eq!(content.images, vec!["cover.png"]);
        assert!(matches!(details, ResourceDetails::Course(c) if c.credit == 3));
    }

    #[test]
    fn test_material_requires_location() {
        assert!(MaterialUpload::default().into_material("alice").is_err());

        let material = MaterialUpload {
            introduction: "slides".into(),
            file: Some("uploads/slides.pdf".into()),
            ..Default::default()
        }
        .into_material("alice")
        .unwrap();
        assert_eq!(material.location(), "uploads/slides.pdf");
    }
}

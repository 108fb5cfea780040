//! Audit trail record of an audit-status change

use chrono::{DateTime, Utc};
use kernel::id::ResourceId;

use crate::domain::entity::resource::Resource;
use crate::domain::value_object::{audit_status::AuditStatus, resource_kind::ResourceKind};
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub resource_id: ResourceId,
    pub kind: ResourceKind,
    pub old_status: AuditStatus,
    pub new_status: AuditStatus,
    /// User name of the admin or owner who made the change
    pub operator: String,
    pub reason: Option<String>,
    pub operated_at: DateTime<Utc>,
}

impl StatusTransition {
    /// Snapshot taken right after `resource` moved away from `old_status`
    pub(crate) fn record(
        resource: &Resource,
        old_status: AuditStatus,
        operator: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_id: resource.resource_id,
            kind: resource.kind(),
            old_status,
            new_status: resource.audit.status,
            operator: operator.to_owned(),
            reason: resource.audit.reject_reason.clone(),
            operated_at: at,
        }
    }

    /// Verb of the action that produced this transition
    pub fn action(&self) -> &'static str {
        match self.new_status {
            AuditStatus::Approved => "approve",
            AuditStatus::Rejected => "reject",
            AuditStatus::Withdrawn => "withdraw",
            AuditStatus::Pending => "resubmit",
        }
    }

    /// Error for a stored status that moved on before this transition landed
    pub fn conflict(&self, current: AuditStatus) -> CatalogError {
        CatalogError::InvalidTransition {
            from: current,
            action: self.action(),
        }
    }
}

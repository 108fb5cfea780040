//! Audit state of a submission
//!
//! ```text
//! pending ──approve──▶ approved
//!    │  ╲──reject───▶ rejected ──resubmit──▶ pending
//!    └withdraw▶ withdrawn ──resubmit──▶ pending
//! ```
//! A rejected submission may also be withdrawn.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
    #[display("withdrawn")]
    Withdrawn,
}

impl AuditStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AuditStatus::Pending => "pending",
            AuditStatus::Approved => "approved",
            AuditStatus::Rejected => "rejected",
            AuditStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(AuditStatus::Pending),
            "approved" => Some(AuditStatus::Approved),
            "rejected" => Some(AuditStatus::Rejected),
            "withdrawn" => Some(AuditStatus::Withdrawn),
            _ => None,
        }
    }
}

/// Admin decision on a pending submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" | "pass" | "通过" => Some(ReviewAction::Approve),
            "reject" | "rejected" | "拒绝" => Some(ReviewAction::Reject),
            _ => None,
        }
    }

    pub const fn target(&self) -> AuditStatus {
        match self {
            ReviewAction::Approve => AuditStatus::Approved,
            ReviewAction::Reject => AuditStatus::Rejected,
        }
    }
}

/// Owner action on their own submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OwnerAction {
    #[display("withdraw")]
    Withdraw,
    #[display("resubmit")]
    Resubmit,
}

impl OwnerAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "withdraw" | "withdrawn" => Some(OwnerAction::Withdraw),
            "resubmit" | "pending" => Some(OwnerAction::Resubmit),
            _ => None,
        }
    }

    /// New status, or `None` when the action is not allowed from `current`
    pub const fn apply(&self, current: AuditStatus) -> Option<AuditStatus> {
        match (self, current) {
            (OwnerAction::Withdraw, AuditStatus::Pending | AuditStatus::Rejected) => {
                Some(AuditStatus::Withdrawn)
            }
            (OwnerAction::Resubmit, AuditStatus::Rejected | AuditStatus::Withdrawn) => {
                Some(AuditStatus::Pending)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for status in [
            AuditStatus::Pending,
            AuditStatus::Approved,
            AuditStatus::Rejected,
            AuditStatus::Withdrawn,
        ] {
            assert_eq!(AuditStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(AuditStatus::from_code("deleted"), None);
    }

    #[test]
    fn test_owner_actions() {
        assert_eq!(
            OwnerAction::Withdraw.apply(AuditStatus::Pending),
            Some(AuditStatus::Withdrawn)
        );
        assert_eq!(
            OwnerAction::Resubmit.apply(AuditStatus::Rejected),
            Some(AuditStatus::Pending)
        );
        assert_eq!(OwnerAction::Withdraw.apply(AuditStatus::Approved), None);
        assert_eq!(OwnerAction::Resubmit.apply(AuditStatus::Pending), None);
    }

    #[test]
    fn test_review_action_parse() {
        assert_eq!(ReviewAction::parse("APPROVE"), Some(ReviewAction::Approve));
        assert_eq!(ReviewAction::parse("拒绝"), Some(ReviewAction::Reject));
        assert_eq!(ReviewAction::parse("maybe"), None);
    }
}

//! Value Objects

pub mod audit_status;
pub mod listing;
pub mod resource_kind;

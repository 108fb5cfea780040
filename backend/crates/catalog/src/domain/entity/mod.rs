//! Entity Module

pub mod comment;
pub mod resource;
pub mod transition;

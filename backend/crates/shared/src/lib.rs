//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every feature crate agrees on:
//! - Common error types and result aliases
//! - Typed UUID identifiers
//! - The JSON response envelope (`{message, data}`)
//!
//! Only things with the same meaning across `auth` and `catalog` live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;

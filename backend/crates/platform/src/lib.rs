//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the feature crates:
//! - Password hashing (Argon2id)
//! - Bearer token header parsing
//! - JSON-or-form request binding and multi-value query parsing

pub mod bearer;
pub mod extract;
pub mod password;

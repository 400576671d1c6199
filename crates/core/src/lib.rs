//! `hrs-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the identity and
//! authorization layers (no transport or storage concerns).

pub mod config;
pub mod error;
pub mod id;

pub use config::SecurityConfig;
pub use error::{DomainError, DomainResult};
pub use id::UserId;

//! Core types for Luxe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Role, SectionKind};
pub use slug::Slug;

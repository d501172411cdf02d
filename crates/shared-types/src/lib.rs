//! # Shared Types Crate
//!
//! Primitive identifiers used across the dissemination subsystem and the
//! components that call it (consensus, transport).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: hashes, keys and peer addresses are defined
//!   once here.
//! - **No behaviour**: only construction, comparison and display helpers.

pub mod entities;

pub use entities::*;

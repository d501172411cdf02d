//! # Domain Layer for Block Dissemination
//!
//! Pure business logic with no I/O dependencies. This is the innermost layer
//! of the hexagonal architecture.
//!
//! ## Contents
//!
//! - **entities**: committee/shard/lookup members, `FilteredCommittee`, results
//! - **value_objects**: configuration (`DisseminationConfig`, `FanoutMode`)
//! - **services**: partitioner, lookup-window selector, shard fan-out selection
//! - **invariants**: checks every honest node must agree on
//! - **errors**: `DisseminationError`
//!
//! ## Design Principles
//!
//! 1. **No I/O**: All functions are pure and synchronous
//! 2. **Deterministic**: same inputs, same assignment, on every node
//! 3. **Testable**: All logic can be unit tested without mocks

mod entities;
mod errors;
mod invariants;
mod services;
mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;

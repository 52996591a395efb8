//! Persistence medium and storage errors
//!
//! The record store talks to an abstract key-value medium; everything here
//! is the plumbing underneath it.

pub mod error;
pub mod medium;

pub use error::{MediumError, StoreError, StoreResult};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};

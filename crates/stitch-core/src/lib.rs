//! Stitch Core - Foundational types for the stitch crates
//!
//! This crate provides the types that all other stitch crates depend on:
//! - `StructuralError` / `FieldIssue` - schema gate rejections
//! - `StitchError` and the `Result` alias

mod error;
mod issue;

pub use error::{Result, StitchError};
pub use issue::{FieldIssue, IssueKind, StructuralError};

//! Core functionality for draft-pr.
//!
//! This module contains the main components:
//! - [`context`]: Immutable per-run context and branch naming
//! - [`pipeline`]: The draft PR state machine
//! - [`error`]: Error types and result handling
//! - [`executor`]: External command execution
//! - [`git`]: Git repository operations
//! - [`pr`]: Draft pull request creation

pub mod context;
pub mod error;
pub mod executor;
pub mod git;
pub mod pipeline;
pub mod pr;

//! Service layer for business logic.
//!
//! Keeps sorting and warm-up logic out of the shell so it can be tested without one.

pub mod sorting_service;
pub mod warmup_service;

pub use sorting_service::{
    AssignOutcome, CategoryEdit, SessionOptions, SessionPhase, SortingSession,
};
pub use warmup_service::WarmupService;

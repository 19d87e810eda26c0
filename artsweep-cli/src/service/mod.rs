//! Service layer
//!
//! Services contain the cleanup logic. They drive the repository layer
//! through one run: search each configured unit, guard the results against
//! the skip list, then copy to the recycle repository and delete.

mod cleanup;
mod context;

pub use cleanup::CleanupService;
pub use context::{RunContext, RunMode};

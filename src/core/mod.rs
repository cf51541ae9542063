//! Core module containing the generation-task engine
//!
//! This module contains:
//! - Task kind, parameter and status types
//! - Input gathering and content generation per task kind
//! - The coordinator driving a task's 0/50/100 progress lifecycle
//! - The read-only progress reporter used by polling clients

mod coordinator;
mod generation;
mod progress;
mod task_kind;
mod task_state;

pub use coordinator::*;
pub use generation::*;
pub use progress::*;
pub use task_kind::*;
pub use task_state::*;

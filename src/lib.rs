//! docforge is an asynchronous AI generation-task service.
//!
//! Clients submit long-running generation work (documents, source code,
//! checks, estimates, proposals, reports) over HTTP, get a task id back
//! immediately, and poll until the task completes with a reference to
//! the persisted artifact.

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod db;
pub mod errors;
pub mod llm;
pub mod schema;
pub mod utils;

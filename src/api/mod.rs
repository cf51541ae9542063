/// Bearer-token authentication against the session store
pub mod auth;
/// API error types and handling
pub mod errors;
/// API module containing HTTP handlers for task submission and polling
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;

//! API Module
//!
//! HTTP handlers and routing that host a cache engine over JSON.
//!
//! See [`create_router`] for the endpoint list.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

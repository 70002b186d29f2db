//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the host is up.
//!
//! # Tasks
//! - Expired sweep: Removes expired cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;

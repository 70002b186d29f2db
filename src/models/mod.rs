//! Request and Response models for the cache HTTP host
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{NamespaceQuery, SetRequest};
pub use responses::{
    CleanNamespaceResponse, DeleteResponse, ErrorResponse, ExistsResponse, GetResponse,
    HealthResponse, MessageResponse, PersistResponse, SetResponse, StatsResponse, SweepResponse,
};

//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` sends envelope-wrapped REST calls, `endpoints` describes them per
//! resource, `query` caches their results by structured key, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod types;

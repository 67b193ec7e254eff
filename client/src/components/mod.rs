//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render session-aware chrome and record cards while reading and
//! writing shared state from Leptos context providers.

pub mod auth_provider;
pub mod job_card;
pub mod route_guard;
pub mod site_header;
pub mod spinner;
pub mod toast_host;

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (queries, mutations, form state)
//! and delegates rendering details to `components`. Role-restricted pages
//! assume their `RouteGuard` has already admitted the session.

pub mod admin;
pub mod dashboard;
pub mod employer;
pub mod home;
pub mod jobs;
pub mod login;
pub mod oauth_callback;
pub mod register;

//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep decisions (guards, callback parsing, debouncing) pure
//! and testable, and isolate the Leptos/browser glue that pages share.

pub mod debounce;
pub mod fetch;
pub mod guard;
pub mod oauth;

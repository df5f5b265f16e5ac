//! Use-case facade over the mood core.
//!
//! # Responsibility
//! - Bind configuration, store, clock and collaborators for one session.
//! - Expose one entry point per user action.
//!
//! # Invariants
//! - Each action runs to completion before the next; no shared mutation.

pub mod mood_service;

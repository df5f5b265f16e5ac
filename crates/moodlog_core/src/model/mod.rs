//! Mood domain model.
//!
//! # Responsibility
//! - Define the closed set of canonical mood labels and their display form.
//! - Define the per-day record persisted by the mood log.
//!
//! # Invariants
//! - Every stored mood is one of the six canonical labels.
//! - A record is keyed by calendar date at day granularity.

pub mod mood;

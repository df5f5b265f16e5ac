//! Motivational message composition.
//!
//! # Responsibility
//! - Hold the fixed fallback affirmations.
//! - Combine an optional generation collaborator with those affirmations into
//!   a two-part reply.
//!
//! # Invariants
//! - Message composition never fails; generation problems fall back to quotes.

pub mod composer;
pub mod quote_bank;

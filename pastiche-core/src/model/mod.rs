//! Word-level n-gram language modelling.
//!
//! This module covers the whole learn/generate/persist cycle:
//! - Per-text contribution tracking with exact removal (`corpus`)
//! - Aggregated next-token counts over all learned texts (`index`)
//! - Weighted random sentence generation (`generator`)
//! - The learn/forget/reply orchestrator (`talk_model`)

/// Text encoding of the per-text count tables.
///
/// Not exposed; callers go through `TalkModel::serialize`.
pub(crate) mod codec;

/// Per-text n-gram contributions with exact removal.
pub mod corpus;

/// Sentence generation against the aggregate counts.
pub mod generator;

/// Aggregated n-gram → next-token counts.
pub mod index;

/// The n-gram lookup key and its wire encoding.
pub mod ngram;

/// Outgoing transitions of a single n-gram (weighted sampling).
///
/// This module is not exposed publicly.
pub(crate) mod state;

/// High-level learn/forget/generate interface.
pub mod talk_model;

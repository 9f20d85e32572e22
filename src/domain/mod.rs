//! Core domain types and logic: the metric table, peer statistics,
//! comparison and section scoring.

pub mod field;
pub mod record;
pub mod dataset;
pub mod peer_stats;
pub mod comparison;
pub mod section;
pub mod format;
pub mod symbol;
pub mod batch;
pub mod error;

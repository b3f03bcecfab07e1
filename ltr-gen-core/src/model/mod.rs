//! Top-level module for the LTR Markov table engine.
//!
//! This crate models the letter transition record (".ltr") format,
//! including:
//! - The fixed alphabet codec (`Letter`)
//! - Cumulative distribution storage per context (`Cdf`)
//! - The full table with its binary codec and repair pass (`LtrTable`)
//! - Frequency counting and normalization (`TableBuilder`)
//! - Random word synthesis (`sampler`)

/// Fixed ordered alphabet and its dense index codec.
///
/// The index assignment defines the array semantics of the binary
/// format; it is a build-time constant of the crate.
pub mod alphabet;

/// Per-context cumulative distribution storage and the scan-and-select
/// primitive sampling is built on.
pub mod cdf;

/// The complete table: binary decode/encode and the corruption repair
/// pass for tables written by the buggy original tool.
pub mod table;

/// Training-word ingestion, frequency counting at three context
/// depths, and count-to-CDF normalization.
pub mod builder;

/// Word synthesis by rejection sampling over the CDFs, with bounded
/// backtracking and full restarts.
pub mod sampler;

//! LTR Markov chain table engine.
//!
//! This crate parses, repairs, builds and samples from ".ltr" files:
//! fixed-size binary tables of cumulative distribution functions over
//! a 28-letter alphabet, as used by the game's random name generator.
//! For any sequence of up to 3 letters the table stores the
//! probability that it appears at the start, in the middle or at the
//! end of a name.
//!
//! The engine is single-threaded by design: a table is built or loaded
//! in full, optionally repaired once, then read-only for sampling.
//! Command-line handling and table pretty-printing live in the
//! consumer binary, not here.

/// Core table model: alphabet, CDFs, binary codec, builder, sampler.
pub mod model;

/// Error types shared across the crate.
pub mod error;

/// File-level convenience I/O around the byte codec.
pub mod io;

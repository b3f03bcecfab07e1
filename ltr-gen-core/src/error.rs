use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = LtrError> = std::result::Result<T, E>;

/// Failures raised while loading, decoding or storing an LTR table.
///
/// All variants are fatal for the operation that raised them: there is
/// no partial table to return. Recoverable conditions (invalid training
/// characters, post-repair drift) are logged instead of reported here.
#[derive(Debug, Error)]
pub enum LtrError {
	/// The buffer does not open with the expected `"LTR V1.0"` tag.
	#[error("no valid LTR header")]
	BadMagic,

	/// The header declares an alphabet size this build does not support.
	#[error("file built for {found} letters, tool only supports {expected}")]
	AlphabetSizeMismatch { found: u8, expected: u8 },

	/// The probability table block ends before every CDF was read.
	#[error("truncated table data: expected {expected} bytes, got {found}")]
	Truncated { expected: usize, found: usize },

	/// Filesystem error with the offending path attached.
	#[error("io error while processing {path:?}: {source}")]
	Io {
		source: std::io::Error,
		path: PathBuf,
	},
}

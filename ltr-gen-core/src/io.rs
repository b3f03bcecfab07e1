use std::fs;
use std::path::Path;

use crate::error::{LtrError, Result};
use crate::model::table::LtrTable;

/// Reads a whole LTR file from disk and decodes it.
///
/// The file is always read in full; there is no streaming or partial
/// load. Filesystem failures carry the offending path.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LtrTable> {
	let path = path.as_ref();
	let bytes = fs::read(path).map_err(|source| LtrError::Io {
		source,
		path: path.to_path_buf(),
	})?;
	LtrTable::from_bytes(&bytes)
}

/// Serializes a table and writes it to disk in one shot.
pub fn save_file<P: AsRef<Path>>(path: P, table: &LtrTable) -> Result<()> {
	let path = path.as_ref();
	fs::write(path, table.to_bytes()).map_err(|source| LtrError::Io {
		source,
		path: path.to_path_buf(),
	})
}

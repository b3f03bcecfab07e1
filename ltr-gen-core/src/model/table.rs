use log::{debug, info, warn};

use crate::error::{LtrError, Result};
use super::alphabet::{pair_index, Letter, NUM_LETTERS};
use super::cdf::Cdf;

/// Magic tag opening every LTR file.
pub const MAGIC: &[u8; 8] = b"LTR V1.0";

/// Header size: magic tag plus the one-byte alphabet size.
pub const HEADER_LEN: usize = MAGIC.len() + 1;

const FLOATS_PER_CDF: usize = 3 * NUM_LETTERS;
const CDF_COUNT: usize = 1 + NUM_LETTERS + NUM_LETTERS * NUM_LETTERS;

/// Exact byte size of a serialized table, header included.
pub const SERIALIZED_LEN: usize = HEADER_LEN + CDF_COUNT * FLOATS_PER_CDF * 4;

/// Tolerance band a populated cumulative array must terminate in.
///
/// Tables produced by the original vendor tool lost precision at some
/// point during generation, so even correct files rarely hit exactly
/// 1.0; the band gives them the same leeway the game does.
const TERMINAL_RANGE: std::ops::RangeInclusive<f32> = 0.9999..=1.0001;

/// The complete Markov chain table of an LTR file.
///
/// Holds one unconditioned CDF (`singles`), one CDF per preceding
/// letter (`doubles`) and one per preceding letter pair (`triples`,
/// row-major on the first letter). Every conditioned CDF has the same
/// shape as `singles` but describes a distinct conditional
/// distribution.
///
/// # Responsibilities
/// - Decode and encode the fixed binary layout
/// - Detect and repair the historical singles-table corruption
/// - Give the sampler bounds-checked access to every context
///
/// # Notes
/// - A table is built or loaded once, optionally repaired once, and
///   read-only afterwards. There are no partial updates.
/// - Floats are stored in the native byte order of the platform; the
///   format carries no endianness marker. This is a limitation of the
///   original format, kept for compatibility.
#[derive(Clone, PartialEq, Debug)]
pub struct LtrTable {
	singles: Cdf,
	doubles: Vec<Cdf>,
	triples: Vec<Cdf>,
}

struct FloatReader<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> FloatReader<'a> {
	fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	// The caller checks the total length up front, so the slice
	// accesses below cannot go out of bounds.
	fn next(&mut self) -> f32 {
		let b = &self.bytes[self.pos..self.pos + 4];
		self.pos += 4;
		f32::from_ne_bytes([b[0], b[1], b[2], b[3]])
	}

	fn array(&mut self) -> [f32; NUM_LETTERS] {
		let mut out = [0.0; NUM_LETTERS];
		for value in &mut out {
			*value = self.next();
		}
		out
	}

	fn cdf(&mut self) -> Cdf {
		Cdf {
			start: self.array(),
			middle: self.array(),
			end: self.array(),
		}
	}
}

impl LtrTable {
	/// Assembles a table from already-normalized CDFs.
	///
	/// `doubles` must hold `NUM_LETTERS` entries and `triples`
	/// `NUM_LETTERS`² entries in row-major context order; only the
	/// builder and the decoder construct tables, so this stays
	/// crate-private.
	pub(crate) fn from_cdfs(singles: Cdf, doubles: Vec<Cdf>, triples: Vec<Cdf>) -> Self {
		debug_assert_eq!(doubles.len(), NUM_LETTERS);
		debug_assert_eq!(triples.len(), NUM_LETTERS * NUM_LETTERS);
		Self { singles, doubles, triples }
	}

	/// The unconditioned CDF.
	pub fn singles(&self) -> &Cdf {
		&self.singles
	}

	/// The CDF conditioned on one preceding letter.
	pub fn doubles(&self, first: Letter) -> &Cdf {
		&self.doubles[first.index()]
	}

	/// The CDF conditioned on two preceding letters, oldest first.
	pub fn triples(&self, first: Letter, second: Letter) -> &Cdf {
		&self.triples[pair_index(first, second)]
	}

	/// Decodes a table from the raw bytes of an LTR file.
	///
	/// Validates the magic tag and the declared alphabet size, then
	/// reads the CDF block: singles, the `NUM_LETTERS` doubles, the
	/// `NUM_LETTERS`² triples, each as 3×`NUM_LETTERS` native-order
	/// f32 values (start, middle, end). Bytes past the table are
	/// ignored.
	///
	/// # Errors
	/// - [`LtrError::BadMagic`] if the buffer is shorter than the
	///   header or the tag mismatches
	/// - [`LtrError::AlphabetSizeMismatch`] if the file was built for
	///   a different alphabet size
	/// - [`LtrError::Truncated`] if the CDF block is incomplete
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
			return Err(LtrError::BadMagic);
		}

		let declared = bytes[MAGIC.len()];
		if declared as usize != NUM_LETTERS {
			return Err(LtrError::AlphabetSizeMismatch {
				found: declared,
				expected: NUM_LETTERS as u8,
			});
		}

		if bytes.len() < SERIALIZED_LEN {
			return Err(LtrError::Truncated {
				expected: SERIALIZED_LEN,
				found: bytes.len(),
			});
		}

		let mut reader = FloatReader::new(&bytes[HEADER_LEN..]);
		let singles = reader.cdf();
		let doubles = (0..NUM_LETTERS).map(|_| reader.cdf()).collect();
		let triples = (0..NUM_LETTERS * NUM_LETTERS).map(|_| reader.cdf()).collect();

		Ok(Self { singles, doubles, triples })
	}

	/// Encodes the table into the binary LTR layout.
	///
	/// The output round-trips bit-for-bit through [`from_bytes`]:
	/// header, then every CDF in the same nesting order the decoder
	/// expects, with no padding or length prefixes.
	///
	/// [`from_bytes`]: LtrTable::from_bytes
	pub fn to_bytes(&self) -> Vec<u8> {
		fn push_array(out: &mut Vec<u8>, values: &[f32; NUM_LETTERS]) {
			for value in values {
				out.extend_from_slice(&value.to_ne_bytes());
			}
		}
		fn push_cdf(out: &mut Vec<u8>, cdf: &Cdf) {
			push_array(out, &cdf.start);
			push_array(out, &cdf.middle);
			push_array(out, &cdf.end);
		}

		let mut out = Vec::with_capacity(SERIALIZED_LEN);
		out.extend_from_slice(MAGIC);
		out.push(NUM_LETTERS as u8);

		push_cdf(&mut out, &self.singles);
		for cdf in &self.doubles {
			push_cdf(&mut out, cdf);
		}
		for cdf in &self.triples {
			push_cdf(&mut out, cdf);
		}

		out
	}

	/// Detects and corrects the historical singles-table corruption.
	///
	/// The vendor tool that produced the original LTR files had a bug
	/// that stopped propagating cumulative values in `singles.middle`
	/// and `singles.end` past any zero-probability entry, leaving a
	/// sequence that never climbs to 1.0. Each of the two arrays is
	/// checked independently: it counts as corrupt when *no* entry
	/// falls within the terminal tolerance band. Nothing else is ever
	/// touched; tables with other anomalies pass through unmodified.
	///
	/// Returns `true` when at least one array was rewritten. Repairing
	/// an already-correct table is a no-op, so the operation is
	/// idempotent.
	pub fn repair(&mut self) -> bool {
		let mut repaired = false;

		if Self::is_corrupt(&self.singles.middle) {
			info!("correcting errors in the singles.middle probability table");
			Self::repair_array(&mut self.singles.middle);
			repaired = true;
		}
		if Self::is_corrupt(&self.singles.end) {
			info!("correcting errors in the singles.end probability table");
			Self::repair_array(&mut self.singles.end);
			repaired = true;
		}
		if repaired {
			info!("corrections completed");
		}

		repaired
	}

	/// The corruption signal: the distribution never reaches ~1.0
	/// anywhere in the array. Deliberately narrow; a legitimately
	/// all-zero-then-single-nonzero-at-end table can false-positive,
	/// which matches the original tool.
	fn is_corrupt(values: &[f32; NUM_LETTERS]) -> bool {
		!values.iter().any(|&value| TERMINAL_RANGE.contains(&value))
	}

	/// Rebuilds a truncated cumulative sequence in place.
	///
	/// Walks the array in index order keeping an accumulator and a
	/// pending correction offset. Whenever a nonzero raw value follows
	/// a zero one, the offset snapshots the accumulator: that is the
	/// gap the original bug dropped. Zero slots are never rewritten.
	fn repair_array(values: &mut [f32; NUM_LETTERS]) {
		let mut accumulator = 0.0f32;
		let mut correction = 0.0f32;
		let mut prev = 0.0f32;

		for (letter, slot) in Letter::all().zip(values.iter_mut()) {
			let raw = *slot;
			if raw != 0.0 {
				if letter.index() > 0 && prev == 0.0 {
					correction = accumulator;
				}
				accumulator = raw + correction;
				*slot = accumulator;
			}
			debug!(
				"ltr {}: original {raw:.6}, corrected {:.6}, acc {accumulator:.6}, offset {correction:.6}",
				letter.as_char(),
				*slot,
			);
			prev = raw;
		}

		if !TERMINAL_RANGE.contains(&accumulator) {
			warn!("accumulator ended up at an incorrect value of {accumulator:.6} after fixing");
		}
	}
}

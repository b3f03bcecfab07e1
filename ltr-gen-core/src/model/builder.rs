use log::warn;

use super::alphabet::{pair_index, Letter, NUM_LETTERS};
use super::cdf::Cdf;
use super::table::LtrTable;

/// Raw occurrence counters for one context, before normalization.
#[derive(Clone)]
struct Counts {
	start: [u32; NUM_LETTERS],
	middle: [u32; NUM_LETTERS],
	end: [u32; NUM_LETTERS],
}

impl Counts {
	fn zeroed() -> Self {
		Self {
			start: [0; NUM_LETTERS],
			middle: [0; NUM_LETTERS],
			end: [0; NUM_LETTERS],
		}
	}

	fn normalize(&self) -> Cdf {
		Cdf {
			start: normalize_class(&self.start),
			middle: normalize_class(&self.middle),
			end: normalize_class(&self.end),
		}
	}
}

/// Converts one position class of counters into a cumulative
/// distribution.
///
/// Nonzero slots become their probability plus the running sum of the
/// already-converted nonzero slots before them; zero slots stay at 0.0
/// and do not move the accumulator. A class with no observations at
/// all stays all-zero.
fn normalize_class(counts: &[u32; NUM_LETTERS]) -> [f32; NUM_LETTERS] {
	let mut out = [0.0f32; NUM_LETTERS];

	let total: u32 = counts.iter().sum();
	if total == 0 {
		return out;
	}

	let mut running = 0.0f32;
	for (slot, &count) in out.iter_mut().zip(counts) {
		if count > 0 {
			running += count as f32 / total as f32;
			*slot = running;
		}
	}

	out
}

/// Accumulates letter-transition frequencies from training words and
/// normalizes them into an [`LtrTable`].
///
/// # Responsibilities
/// - Clean each incoming token (comments, case, alphabet filtering)
/// - Count start/middle/end occurrences at all three context depths
/// - Turn every counter class into a CDF once input is exhausted
///
/// # Notes
/// - Invalid characters and too-short tokens are logged and skipped,
///   never fatal.
/// - A word must keep at least 3 valid letters to contribute: anything
///   shorter cannot provide a start and an end context.
pub struct TableBuilder {
	singles: Counts,
	doubles: Vec<Counts>,
	triples: Vec<Counts>,
}

impl Default for TableBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TableBuilder {
	/// Creates a builder with every counter at zero.
	pub fn new() -> Self {
		Self {
			singles: Counts::zeroed(),
			doubles: vec![Counts::zeroed(); NUM_LETTERS],
			triples: vec![Counts::zeroed(); NUM_LETTERS * NUM_LETTERS],
		}
	}

	/// Cleans one raw token into alphabet letters.
	///
	/// Truncates at the first `#` (comment marker), lowercases, and
	/// drops characters outside the alphabet with a warning. Valid
	/// letters stay concatenated with no gap where a character was
	/// dropped.
	fn clean_word(raw: &str) -> Vec<Letter> {
		let mut letters = Vec::new();

		for c in raw.chars() {
			if c == '#' {
				break;
			}
			let lower = c.to_lowercase().next().unwrap_or(c);
			match Letter::from_char(lower) {
				Some(letter) => letters.push(letter),
				None => warn!("invalid character {lower:?} in name {raw:?}, skipping character"),
			}
		}

		letters
	}

	/// Feeds one training word into the counters.
	///
	/// The first 1/2/3 letters feed the `start` counters of the
	/// singles/doubles/triples contexts, the last 1/2/3 letters feed
	/// the `end` counters (read backward: last, second-to-last,
	/// third-to-last), and every interior triple strictly between the
	/// two windows feeds the `middle` counters. Words of length 3 or 4
	/// have no interior triple and contribute no middle counts.
	pub fn add_word(&mut self, raw: &str) {
		let word = Self::clean_word(raw);
		let len = word.len();
		if len < 3 {
			let cleaned: String = word.iter().map(|l| l.as_char()).collect();
			warn!("name {cleaned:?} is too short, skipping name");
			return;
		}

		self.singles.start[word[0].index()] += 1;
		self.doubles[word[0].index()].start[word[1].index()] += 1;
		self.triples[pair_index(word[0], word[1])].start[word[2].index()] += 1;

		self.singles.end[word[len - 1].index()] += 1;
		self.doubles[word[len - 2].index()].end[word[len - 1].index()] += 1;
		self.triples[pair_index(word[len - 3], word[len - 2])].end[word[len - 1].index()] += 1;

		for i in 1..len - 3 {
			self.singles.middle[word[i].index()] += 1;
			self.doubles[word[i].index()].middle[word[i + 1].index()] += 1;
			self.triples[pair_index(word[i], word[i + 1])].middle[word[i + 2].index()] += 1;
		}
	}

	/// Normalizes every counter class into its CDF and returns the
	/// finished table.
	pub fn finish(self) -> LtrTable {
		LtrTable::from_cdfs(
			self.singles.normalize(),
			self.doubles.iter().map(Counts::normalize).collect(),
			self.triples.iter().map(Counts::normalize).collect(),
		)
	}
}

/// Builds a table from a sequence of training words in one call.
pub fn build_table<I, S>(words: I) -> LtrTable
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut builder = TableBuilder::new();
	for word in words {
		builder.add_word(word.as_ref());
	}
	builder.finish()
}

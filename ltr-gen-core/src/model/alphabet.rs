/// Number of symbols in the LTR alphabet.
///
/// The game engine the file format comes from never supports more than
/// 28 letters. Files could declare fewer (plain alpha), but the special
/// symbols can simply be given a probability of 0 to the same effect,
/// so the size is a build-time constant of this crate.
pub const NUM_LETTERS: usize = 28;

const LETTERS: [char; NUM_LETTERS] = [
	'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
	'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
	'\'', '-',
];

/// A validated symbol of the LTR alphabet.
///
/// Wraps the dense index every table array is keyed by: the 26
/// lowercase Latin letters map to 0–25 in alphabetical order, the
/// apostrophe to 26 and the hyphen to 27. This ordering is what the
/// binary format implicitly encodes, so it must never change.
///
/// # Invariants
/// - The wrapped index is always < `NUM_LETTERS`
/// - `from_char` and `as_char` form a bijection over the alphabet
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Letter(u8);

impl Letter {
	/// Maps a character to its alphabet position.
	///
	/// Returns `None` for anything outside the alphabet, including
	/// uppercase letters: callers lowercase before lookup.
	pub fn from_char(c: char) -> Option<Self> {
		match c {
			'a'..='z' => Some(Self(c as u8 - b'a')),
			'\'' => Some(Self(26)),
			'-' => Some(Self(27)),
			_ => None,
		}
	}

	/// Maps a raw array index back to a letter.
	///
	/// Returns `None` if the index is out of range; this is the only
	/// place raw indices are allowed to enter.
	pub fn from_index(index: usize) -> Option<Self> {
		if index < NUM_LETTERS {
			Some(Self(index as u8))
		} else {
			None
		}
	}

	/// Returns the character this letter stands for.
	pub fn as_char(self) -> char {
		LETTERS[self.0 as usize]
	}

	/// Returns the dense array index of this letter.
	pub fn index(self) -> usize {
		self.0 as usize
	}

	/// Iterates over the whole alphabet in index order.
	pub fn all() -> impl Iterator<Item = Self> {
		(0..NUM_LETTERS as u8).map(Self)
	}
}

/// Flat index of a two-letter context into a row-major
/// `NUM_LETTERS`×`NUM_LETTERS` table.
pub(crate) fn pair_index(first: Letter, second: Letter) -> usize {
	first.index() * NUM_LETTERS + second.index()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn letters_map_to_alphabetical_positions() {
		assert_eq!(Letter::from_char('a').map(Letter::index), Some(0));
		assert_eq!(Letter::from_char('z').map(Letter::index), Some(25));
		assert_eq!(Letter::from_char('\'').map(Letter::index), Some(26));
		assert_eq!(Letter::from_char('-').map(Letter::index), Some(27));
	}

	#[test]
	fn invalid_characters_are_rejected() {
		for c in ['A', 'Z', ' ', '#', '0', 'é', '_'] {
			assert_eq!(Letter::from_char(c), None, "{c:?} should be invalid");
		}
	}

	#[test]
	fn mapping_is_a_bijection() {
		for letter in Letter::all() {
			assert_eq!(Letter::from_char(letter.as_char()), Some(letter));
			assert_eq!(Letter::from_index(letter.index()), Some(letter));
		}
	}

	#[test]
	fn out_of_range_index_is_rejected() {
		assert_eq!(Letter::from_index(NUM_LETTERS), None);
	}
}

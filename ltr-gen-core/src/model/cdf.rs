use super::alphabet::{Letter, NUM_LETTERS};

/// Position class a symbol is drawn for: start, middle or end of a word.
///
/// Every context carries one cumulative distribution per class; the
/// class picks which of the three arrays a scan runs against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
	Start,
	Middle,
	End,
}

/// Cumulative distribution functions for one context.
///
/// Each array stores, per letter index, the summed selection
/// probability of letters 0..=index for that position class. Slots for
/// letters that never occurred stay at 0.0 and the last nonzero slot of
/// a populated array sits at ~1.0. The cumulative sequence is keyed by
/// alphabet order, not by probability magnitude.
///
/// # Invariants
/// - Each array is independently monotonic over its nonzero slots
/// - A populated array terminates within [0.9999, 1.0001]
///   (floating tolerance inherited from the file format)
/// - An array with no observations is all-zero
#[derive(Clone, PartialEq, Debug)]
pub struct Cdf {
	pub(crate) start: [f32; NUM_LETTERS],
	pub(crate) middle: [f32; NUM_LETTERS],
	pub(crate) end: [f32; NUM_LETTERS],
}

impl Default for Cdf {
	fn default() -> Self {
		Self::zeroed()
	}
}

impl Cdf {
	/// Returns a CDF with every slot at 0.0 (no observations).
	pub(crate) fn zeroed() -> Self {
		Self {
			start: [0.0; NUM_LETTERS],
			middle: [0.0; NUM_LETTERS],
			end: [0.0; NUM_LETTERS],
		}
	}

	/// Cumulative start-of-word values, indexed by letter.
	pub fn start(&self) -> &[f32; NUM_LETTERS] {
		&self.start
	}

	/// Cumulative middle-of-word values, indexed by letter.
	pub fn middle(&self) -> &[f32; NUM_LETTERS] {
		&self.middle
	}

	/// Cumulative end-of-word values, indexed by letter.
	pub fn end(&self) -> &[f32; NUM_LETTERS] {
		&self.end
	}

	fn values(&self, position: Position) -> &[f32; NUM_LETTERS] {
		match position {
			Position::Start => &self.start,
			Position::Middle => &self.middle,
			Position::End => &self.end,
		}
	}

	/// Selects the first letter whose cumulative value exceeds `prob`.
	///
	/// This is the scan every sampling step runs: walk the array in
	/// index order and stop at the first slot strictly above the draw.
	/// Zero slots can never qualify, so absent letters are skipped for
	/// free.
	///
	/// Returns `None` when no slot exceeds the draw, which happens on
	/// empty arrays and on distributions that never reach `prob`
	/// (sparse training data).
	pub fn pick(&self, position: Position, prob: f32) -> Option<Letter> {
		self.values(position)
			.iter()
			.position(|&value| prob < value)
			.and_then(Letter::from_index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cdf_with_start(start: [f32; NUM_LETTERS]) -> Cdf {
		Cdf { start, ..Cdf::zeroed() }
	}

	#[test]
	fn pick_selects_first_slot_above_the_draw() {
		let mut start = [0.0; NUM_LETTERS];
		start[0] = 0.5;
		start[1] = 1.0;
		let cdf = cdf_with_start(start);

		assert_eq!(cdf.pick(Position::Start, 0.2).map(Letter::as_char), Some('a'));
		assert_eq!(cdf.pick(Position::Start, 0.7).map(Letter::as_char), Some('b'));
	}

	#[test]
	fn pick_is_strict_on_slot_boundaries() {
		let mut start = [0.0; NUM_LETTERS];
		start[0] = 0.5;
		start[1] = 1.0;
		let cdf = cdf_with_start(start);

		// A draw equal to a cumulative value falls into the next slot.
		assert_eq!(cdf.pick(Position::Start, 0.5).map(Letter::as_char), Some('b'));
	}

	#[test]
	fn pick_skips_zero_slots() {
		let mut start = [0.0; NUM_LETTERS];
		start[4] = 1.0; // only 'e' ever observed
		let cdf = cdf_with_start(start);

		assert_eq!(cdf.pick(Position::Start, 0.99).map(Letter::as_char), Some('e'));
	}

	#[test]
	fn pick_fails_when_the_distribution_never_reaches_the_draw() {
		let mut start = [0.0; NUM_LETTERS];
		start[0] = 0.3; // truncated distribution from sparse data
		let cdf = cdf_with_start(start);

		assert_eq!(cdf.pick(Position::Start, 0.9), None);
		assert_eq!(Cdf::zeroed().pick(Position::Middle, 0.0), None);
	}
}

use rand::Rng;

use super::alphabet::Letter;
use super::cdf::Position;
use super::table::LtrTable;

/// Dead-end backtracking budget per word before a full restart.
const MAX_DEAD_ENDS: u32 = 100;

/// Modulus of the length-biased termination draw. An integer in
/// [0, 12) is compared against the current word length, so long words
/// get progressively more chances to stop. This exact bias governs the
/// name-length distribution and must not change.
const END_DRAW_RANGE: u32 = 12;

/// Draws one random word from the table.
///
/// Generation walks a small state machine: the first three letters come
/// from the `start` distributions of the singles, doubles and triples
/// contexts in turn; after that each step draws one probability and
/// either terminates against the current triple's `end` distribution or
/// extends against its `middle` one. Any failed scan restarts the whole
/// word; a failed middle scan first backs off one letter and retries,
/// up to [`MAX_DEAD_ENDS`] times.
///
/// The finished word has its first letter capitalized and is always at
/// least 3 letters long.
///
/// # Notes
/// - One probability draw is consumed per scan in the first phase and
///   one per extension step (shared by the end and middle scans), plus
///   one integer draw per extension step. Reproducibility with a
///   seeded RNG depends on this exact order.
/// - Sampling reads the table only; callers may share it freely across
///   sampling calls.
/// - A table whose start distributions are empty (no training data)
///   can never produce a word and would restart forever; sample only
///   from built or fully loaded tables.
pub fn sample_word<R: Rng + ?Sized>(table: &LtrTable, rng: &mut R) -> String {
	'word: loop {
		let mut name: Vec<Letter> = Vec::new();

		// First three letters, each conditioned on what came before.
		let prob = rng.random::<f32>();
		match table.singles().pick(Position::Start, prob) {
			Some(letter) => name.push(letter),
			// Can happen when the training set was too small.
			None => continue 'word,
		}

		let prob = rng.random::<f32>();
		match table.doubles(name[0]).pick(Position::Start, prob) {
			Some(letter) => name.push(letter),
			None => continue 'word,
		}

		let prob = rng.random::<f32>();
		match table.triples(name[0], name[1]).pick(Position::Start, prob) {
			Some(letter) => name.push(letter),
			None => continue 'word,
		}

		let mut dead_ends = 0u32;
		loop {
			let prob = rng.random::<f32>();
			let context = table.triples(name[name.len() - 2], name[name.len() - 1]);

			if rng.random_range(0..END_DRAW_RANGE) as usize <= name.len() {
				if let Some(letter) = context.pick(Position::End, prob) {
					name.push(letter);
					return finish_name(&name);
				}
			}

			match context.pick(Position::Middle, prob) {
				Some(letter) => name.push(letter),
				None => {
					// Dead end: drop the last letter and retry from the
					// shorter context, unless the word got too short or
					// the budget ran out.
					name.pop();
					if name.len() < 3 {
						continue 'word;
					}
					dead_ends += 1;
					if dead_ends > MAX_DEAD_ENDS {
						continue 'word;
					}
				}
			}
		}
	}
}

fn finish_name(letters: &[Letter]) -> String {
	let mut chars = letters.iter().map(|letter| letter.as_char());
	let mut name = String::with_capacity(letters.len());
	if let Some(first) = chars.next() {
		name.push(first.to_ascii_uppercase());
	}
	name.extend(chars);
	name
}

#[cfg(test)]
mod tests {
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	use super::*;
	use crate::model::builder::build_table;

	fn training_table() -> LtrTable {
		build_table([
			"ann", "anna", "anne", "annabel", "annette", "hannah",
			"joanna", "susanna", "marianne", "nanette",
		])
	}

	#[test]
	fn sampled_words_are_at_least_three_letters() {
		let table = training_table();
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..200 {
			let word = sample_word(&table, &mut rng);
			assert!(word.chars().count() >= 3, "too short: {word:?}");
		}
	}

	#[test]
	fn sampled_words_are_capitalized_alphabet_words() {
		let table = training_table();
		let mut rng = StdRng::seed_from_u64(42);

		for _ in 0..50 {
			let word = sample_word(&table, &mut rng);
			let mut chars = word.chars();
			let first = chars.next().expect("non-empty word");
			assert!(first.is_ascii_uppercase() || first == '\'' || first == '-');
			for c in chars {
				assert!(Letter::from_char(c).is_some(), "bad letter {c:?} in {word:?}");
			}
		}
	}

	#[test]
	fn sampling_is_deterministic_for_a_fixed_seed() {
		let table = training_table();
		let mut first = StdRng::seed_from_u64(1234);
		let mut second = StdRng::seed_from_u64(1234);

		for _ in 0..20 {
			assert_eq!(sample_word(&table, &mut first), sample_word(&table, &mut second));
		}
	}

	#[test]
	fn sampled_lengths_stay_within_the_termination_bias_bound() {
		// Once a word reaches 11 letters every step attempts
		// termination; with the dead-end budget on top, lengths stay
		// far below the letter count of the training material.
		let table = training_table();
		let mut rng = StdRng::seed_from_u64(99);

		for _ in 0..200 {
			let word = sample_word(&table, &mut rng);
			assert!(word.chars().count() <= 120, "runaway word: {word:?}");
		}
	}
}

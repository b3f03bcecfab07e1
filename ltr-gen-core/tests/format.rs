//! End-to-end checks of the binary format through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use ltr_gen_core::error::LtrError;
use ltr_gen_core::io::{load_file, save_file};
use ltr_gen_core::model::builder::build_table;
use ltr_gen_core::model::sampler::sample_word;
use ltr_gen_core::model::table::{LtrTable, HEADER_LEN, MAGIC, SERIALIZED_LEN};

const TRAINING: [&str; 8] = [
	"ann", "anna", "anne", "annabel", "hannah", "joanna", "marianne", "nanette",
];

#[test]
fn serialized_layout_matches_the_fixed_format() {
	let table = build_table(TRAINING);
	let bytes = table.to_bytes();

	// Header: 8-byte magic, one-byte alphabet size, then 813 CDFs of
	// 84 floats each with no padding.
	assert_eq!(bytes.len(), SERIALIZED_LEN);
	assert_eq!(&bytes[..8], MAGIC);
	assert_eq!(bytes[8], 28);
	assert_eq!(SERIALIZED_LEN, HEADER_LEN + (1 + 28 + 28 * 28) * 3 * 28 * 4);
}

#[test]
fn built_tables_round_trip_bit_for_bit() {
	let table = build_table(TRAINING);
	let bytes = table.to_bytes();
	let reloaded = LtrTable::from_bytes(&bytes).expect("reload");

	assert_eq!(reloaded, table);
	assert_eq!(reloaded.to_bytes(), bytes);
}

#[test]
fn file_round_trip_through_the_io_layer() {
	let table = build_table(TRAINING);
	let path = std::env::temp_dir().join(format!("ltrgen-test-{}.ltr", std::process::id()));

	save_file(&path, &table).expect("save");
	let reloaded = load_file(&path).expect("load");
	std::fs::remove_file(&path).ok();

	assert_eq!(reloaded, table);
}

#[test]
fn missing_files_surface_an_io_error() {
	let missing = std::env::temp_dir().join("ltrgen-test-does-not-exist.ltr");

	assert!(matches!(load_file(&missing), Err(LtrError::Io { .. })));
}

#[test]
fn a_loaded_table_samples_like_the_built_one() {
	let table = build_table(TRAINING);
	let reloaded = LtrTable::from_bytes(&table.to_bytes()).expect("reload");

	let mut first = StdRng::seed_from_u64(2024);
	let mut second = StdRng::seed_from_u64(2024);
	for _ in 0..20 {
		assert_eq!(
			sample_word(&table, &mut first),
			sample_word(&reloaded, &mut second)
		);
	}
}

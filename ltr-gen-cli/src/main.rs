use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ltr_gen_core::io::{load_file, save_file};
use ltr_gen_core::model::alphabet::{Letter, NUM_LETTERS};
use ltr_gen_core::model::builder::TableBuilder;
use ltr_gen_core::model::cdf::Cdf;
use ltr_gen_core::model::sampler::sample_word;
use ltr_gen_core::model::table::LtrTable;

/// LTR name generator tool.
///
/// Generates random names from .ltr files like the game does, prints
/// their Markov chain tables in a human readable format, or builds a
/// new .ltr file from a set of names.
#[derive(Parser)]
#[command(name = "ltrgen", version)]
struct Args {
	/// Print the Markov chain tables of LTRFILE in a human readable format
	#[arg(short, long)]
	print: bool,

	/// Build Markov chain tables using words from stdin and store them in LTRFILE
	#[arg(short, long)]
	build: bool,

	/// Generate NUM names from LTRFILE and print them to stdout
	#[arg(short, long, value_name = "NUM", num_args = 0..=1, default_missing_value = "100")]
	generate: Option<u32>,

	/// Set the RNG seed to NUM (system entropy by default)
	#[arg(short, long, value_name = "NUM")]
	seed: Option<u64>,

	/// Do not fix corrupted tables (default is to fix)
	#[arg(short = 'n', long = "no-fix")]
	no_fix: bool,

	/// Path of the .ltr file to read or write
	ltrfile: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let args = Args::parse();

	if !(args.print || args.build || args.generate.is_some()) {
		return Err("need at least one of --print, --build, --generate".into());
	}

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let mut table = if args.build {
		let mut input = String::new();
		std::io::stdin().read_to_string(&mut input)?;

		let mut builder = TableBuilder::new();
		for word in input.split_whitespace() {
			builder.add_word(word);
		}
		let table = builder.finish();
		save_file(&args.ltrfile, &table)?;
		table
	} else {
		load_file(&args.ltrfile)?
	};

	if !args.no_fix {
		table.repair();
	}

	if args.print {
		print_table(&table);
	}

	for _ in 0..args.generate.unwrap_or(0) {
		println!("{}", sample_word(&table, &mut rng));
	}

	Ok(())
}

/// Dumps every CDF of the table with both the stored cumulative value
/// and the recovered per-letter probability (difference from the
/// previous nonzero cumulative value).
fn print_table(table: &LtrTable) {
	println!("Num letters: {NUM_LETTERS}");
	println!("Sequence | CDF(start)  P(start) | CDF(middle)  P(middle) | CDF(end)  P(end)");

	print_cdf("", table.singles());
	for first in Letter::all() {
		print_cdf(&first.as_char().to_string(), table.doubles(first));
	}
	for first in Letter::all() {
		for second in Letter::all() {
			let prefix = format!("{}{}", first.as_char(), second.as_char());
			print_cdf(&prefix, table.triples(first, second));
		}
	}
}

fn print_cdf(prefix: &str, cdf: &Cdf) {
	let mut last = [0.0f32; 3];

	for letter in Letter::all() {
		let i = letter.index();
		let values = [cdf.start()[i], cdf.middle()[i], cdf.end()[i]];
		let probabilities: Vec<f32> = values
			.iter()
			.zip(&last)
			.map(|(&value, &prev)| if value == 0.0 { 0.0 } else { value - prev })
			.collect();

		println!(
			"{:<8} | {:.5}     {:.5} | {:.5}      {:.5} | {:.5}   {:.5}",
			format!("{prefix}{}", letter.as_char()),
			values[0], probabilities[0],
			values[1], probabilities[1],
			values[2], probabilities[2],
		);

		for (prev, &value) in last.iter_mut().zip(&values) {
			if value > 0.0 {
				*prev = value;
			}
		}
	}
}

use std::{
	io::{self, Write},
	process::ExitCode,
	time::{SystemTime, UNIX_EPOCH},
};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use ddroller::{
	record::{self, AtomicSequencer, MemoryStore},
	roll::{roller::FastRand as FastRandRoller, Describe},
	slug, Config, NotationParser, ParseError,
};
use tracing_subscriber::EnvFilter;

/// Rolls tabletop dice from dice notation such as "2d20+3|15"
#[derive(Debug, Parser)]
#[command(name = "ddroller", version, about)]
struct Cli {
	/// Dice notation to roll; read from stdin when omitted
	#[arg(allow_hyphen_values = true)]
	expr: Vec<String>,

	/// Seed for the random number generator
	#[arg(long)]
	seed: Option<u64>,

	/// Maximum number of dice allowed in a single roll
	#[arg(long, default_value_t = ddroller::config::DEFAULT_MAX_DICE)]
	max_dice: u32,

	/// Allowed numbers of sides per die
	#[arg(long, value_delimiter = ',', default_values_t = ddroller::config::DEFAULT_SIDES)]
	sides: Vec<u32>,

	/// Sequence number to assign to the roll's record
	#[arg(long, default_value_t = 1)]
	seq: u64,

	/// User to attribute the roll to
	#[arg(long, default_value = "anonymous")]
	user: String,

	/// Maximum number of individual dice to list
	#[arg(long)]
	list_limit: Option<usize>,

	/// Decode a roll identifier into its sequence number instead of rolling
	#[arg(long, conflicts_with = "expr")]
	decode: Option<String>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ddroller=warn")))
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();

	if let Some(slug) = &cli.decode {
		return match slug::decode(slug) {
			Ok(seq) => {
				println!("{seq}");
				ExitCode::SUCCESS
			}
			Err(err) => {
				eprintln!("Error: {err}");
				ExitCode::FAILURE
			}
		};
	}

	let input = if cli.expr.is_empty() {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice notation: ");
			let _ = io::stdout().flush();
		}

		// Grab the first line available from stdin
		match lines.next() {
			Some(Ok(line)) => line,
			Some(Err(err)) => {
				eprintln!("Error reading input: {err}");
				return ExitCode::FAILURE;
			}
			None => {
				eprintln!("No dice notation given");
				return ExitCode::FAILURE;
			}
		}
	} else {
		// Combine all args so that the notation can be left unquoted even with spaces
		cli.expr.join(" ")
	};

	let parser = NotationParser::new(Config::new(cli.max_dice, cli.sides.iter().copied()));
	let spec = match parser.parse(&input) {
		Ok(spec) => spec,
		Err(err) => {
			report_parse_error(&input, &err);
			return ExitCode::FAILURE;
		}
	};

	let mut roller = cli
		.seed
		.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);
	let outcome = spec.roll(&mut roller);

	let timestamp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_or(0, |elapsed| elapsed.as_secs());
	let store = MemoryStore::new();
	let sequencer = AtomicSequencer::starting_after(cli.seq.saturating_sub(1));

	match record::save(&store, &sequencer, cli.user, timestamp, spec, outcome) {
		Ok(record) => {
			println!("{}", record.describe(cli.list_limit));
			println!("Permalink: {}", record.slug());
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("Error: {err}");
			ExitCode::FAILURE
		}
	}
}

/// Prints a parse error, pointing at the offending part of the input when there is one.
fn report_parse_error(input: &str, err: &ParseError) {
	let ParseError::UnsupportedFormat { span, reason } = err else {
		eprintln!("Error: {err}");
		return;
	};

	let printed = Report::build(ReportKind::Error, span.clone())
		.with_message("Your request was not in valid dice roll syntax")
		.with_label(Label::new(span.clone()).with_message(reason).with_color(Color::Red))
		.with_note("Format your request in the style of 2d20, which rolls two dice with 20 sides each")
		.finish()
		.eprint(Source::from(input));

	if printed.is_err() {
		eprintln!("Error: {err}");
	}
}

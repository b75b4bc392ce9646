use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tagmend_cli::OutputFormat;
use tagmend_cli::TagmendCli;
use tagmend_core::EntryOutcome;
use tagmend_core::NormalizeOptions;
use tagmend_core::NormalizeReport;
use tagmend_core::TagmendConfig;
use tagmend_core::detect_tags_with;
use tagmend_core::normalize_container;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TagmendCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<tagmend_core::TagmendError>() {
			Ok(tagmend_err) => {
				let report: miette::Report = (*tagmend_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(1);
	}
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug output
/// with `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();
}

fn resolve_options(args: &TagmendCli) -> Result<NormalizeOptions, Box<dyn std::error::Error>> {
	let config = match &args.config {
		Some(path) => Some(TagmendConfig::load_file(path)?),
		None => {
			let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
			TagmendConfig::load(&root)?
		}
	};

	let options = config
		.map(|config| config.normalize_options())
		.unwrap_or_default();

	Ok(if args.enable_square {
		options.with_square(true)
	} else {
		options
	})
}

fn run(args: &TagmendCli) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args)?;

	// Clap guarantees exactly one of `--output` and `--inplace`.
	let destination = args.output.as_deref().unwrap_or(args.input.as_path());

	let report = normalize_container(&args.input, destination, &options)?;
	let tags = args
		.list_tags
		.then(|| detect_tags_with(destination, &options));

	match args.format {
		OutputFormat::Json => print_json(&report, destination, args.inplace, tags.as_deref()),
		OutputFormat::Text => {
			print_text(&report, destination, args.inplace, tags.as_deref(), args.verbose);
		}
	}

	Ok(())
}

fn print_text(
	report: &NormalizeReport,
	destination: &Path,
	in_place: bool,
	tags: Option<&[String]>,
	verbose: bool,
) {
	if verbose {
		for entry in report.rewritten() {
			if let EntryOutcome::Rewritten { reconstructed } = entry.outcome {
				println!("  {}: {reconstructed} tag(s)", entry.name);
			}
		}
	}

	let summary = format!("Reconstructed {} tag(s).", report.reconstructed);
	if in_place {
		println!(
			"{} {summary} Wrote in-place: {}",
			colored!("Done.", green),
			destination.display()
		);
	} else {
		println!(
			"{} {summary} Output: {}",
			colored!("Done.", green),
			destination.display()
		);
	}

	match tags {
		Some([]) => println!("No tags detected."),
		Some(tags) => println!("Detected tags: {}", tags.join(", ")),
		None => {}
	}
}

fn print_json(report: &NormalizeReport, destination: &Path, in_place: bool, tags: Option<&[String]>) {
	let mut output = serde_json::json!({
		"reconstructed": report.reconstructed,
		"output": destination.display().to_string(),
		"inPlace": in_place,
	});

	if let Some(tags) = tags {
		output["tags"] = serde_json::json!(tags);
	}

	println!("{output}");
}

use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Repair placeholder tags that a word processor split across markup runs.",
	long_about = "tagmend reconnects template placeholders such as {{name}} that Word has torn \
	              apart with formatting or spell-check markup, so that a templating engine can \
	              find them again.\n\nOnly word/*.xml parts are rewritten; every other entry of \
	              the document is copied byte-for-byte.\n\nExactly one of --output or --inplace \
		              must be given.\n\nExamples:\n  tagmend input.docx -o \
	              output.docx\n  tagmend input.docx --inplace --enable-square"
)]
#[command(group(
	ArgGroup::new("destination")
		.required(true)
		.args(["output", "inplace"])
))]
#[allow(clippy::struct_excessive_bools)]
pub struct TagmendCli {
	/// Path to the input `.docx` document.
	pub input: PathBuf,

	/// Path to write the normalized document to. Missing parent directories
	/// are created.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Rewrite the input document in place. The original is only replaced
	/// once the whole document has been processed. Cannot be combined with
	/// `--output`.
	#[arg(long, default_value_t = false)]
	pub inplace: bool,

	/// Also reconnect `[[name]]` placeholders.
	#[arg(long, default_value_t = false)]
	pub enable_square: bool,

	/// List the placeholders present in the output document.
	#[arg(long, default_value_t = false)]
	pub list_tags: bool,

	/// Output format. Use `text` for human-readable output or `json` for
	/// programmatic consumption.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Path to a config file. Defaults to `tagmend.toml`, `.tagmend.toml` or
	/// `.config/tagmend.toml` in the current directory.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TagmendError {
	#[error(transparent)]
	#[diagnostic(code(tagmend::io_error))]
	Io(#[from] std::io::Error),

	#[error("input document not found: `{path}`")]
	#[diagnostic(
		code(tagmend::not_found),
		help("check the path points at an existing .docx file")
	)]
	NotFound { path: String },

	#[error("failed to read document archive `{path}`")]
	#[diagnostic(
		code(tagmend::archive),
		help("the file must be a zip-packaged document such as .docx")
	)]
	Archive {
		path: String,
		#[source]
		source: zip::result::ZipError,
	},

	#[error("failed to write output document `{path}`: {reason}")]
	#[diagnostic(
		code(tagmend::destination_write),
		help("check that the output directory exists and is writable")
	)]
	DestinationWrite { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tagmend::config_parse),
		help("check that tagmend.toml is valid TOML with [delimiters] and/or [parts] sections")
	)]
	ConfigParse(String),
}

pub type TagmendResult<T> = Result<T, TagmendError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;

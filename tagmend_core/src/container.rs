use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;

use crate::DelimiterFamily;
use crate::PartSelector;
use crate::TagmendError;
use crate::TagmendResult;
use crate::reconstruct::reconstruct_families;

/// Options shared by the rewrite pass and the tag census.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
	/// Also reconnect `[[name]]` placeholders.
	pub enable_square: bool,
	/// Which archive entries are treated as document text.
	pub parts: PartSelector,
}

impl NormalizeOptions {
	#[must_use]
	pub fn with_square(mut self, enable_square: bool) -> Self {
		self.enable_square = enable_square;
		self
	}

	#[must_use]
	pub fn with_parts(mut self, parts: PartSelector) -> Self {
		self.parts = parts;
		self
	}

	/// The delimiter families to process, curly first.
	pub fn families(&self) -> Vec<DelimiterFamily> {
		DelimiterFamily::enabled(self.enable_square)
	}
}

/// Why an entry was copied through with its original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PassthroughReason {
	/// The entry is not a textual document part.
	NotQualifying,
	/// The entry is a document part but contained nothing to repair.
	Unchanged,
	/// The entry is a document part whose bytes are not valid UTF-8.
	InvalidUtf8 { valid_up_to: usize },
	/// The entry could not be decompressed.
	ReadFailed(String),
}

/// What happened to a single archive entry during the rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
	/// The entry was rewritten with `reconstructed` repaired placeholders.
	Rewritten { reconstructed: usize },
	/// The entry was copied byte-for-byte.
	Passthrough(PassthroughReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
	pub name: String,
	pub outcome: EntryOutcome,
}

/// Result of a full rewrite pass over one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
	/// One report per entry, in archive order.
	pub entries: Vec<EntryReport>,
	/// Total number of placeholders reconstructed across all entries.
	pub reconstructed: usize,
}

impl NormalizeReport {
	/// Look up the report for the entry called `name`.
	pub fn entry(&self, name: &str) -> Option<&EntryReport> {
		self.entries.iter().find(|entry| entry.name == name)
	}

	/// Entries whose content was rewritten.
	pub fn rewritten(&self) -> impl Iterator<Item = &EntryReport> {
		self.entries
			.iter()
			.filter(|entry| matches!(entry.outcome, EntryOutcome::Rewritten { .. }))
	}
}

/// Normalize the container at `source` into `dest` and return the number of
/// reconstructed placeholders.
///
/// Only the curly family is processed unless `enable_square` is set.
pub fn normalize(
	source: impl AsRef<Path>,
	dest: impl AsRef<Path>,
	enable_square: bool,
) -> TagmendResult<usize> {
	let options = NormalizeOptions::default().with_square(enable_square);
	let report = normalize_container(source.as_ref(), dest.as_ref(), &options)?;

	Ok(report.reconstructed)
}

/// Rewrite the container at `path` in place. The original is only replaced
/// once the whole pass has succeeded.
pub fn normalize_in_place(
	path: impl AsRef<Path>,
	options: &NormalizeOptions,
) -> TagmendResult<NormalizeReport> {
	let path = path.as_ref();
	normalize_container(path, path, options)
}

/// Stream every entry of `source` into `dest`, reconnecting fragmented
/// placeholders in qualifying entries and copying all other entries raw.
///
/// The output is staged in a temporary file next to `dest` and moved into
/// place after the last entry is written, so `dest` is never left partially
/// written and `source` is never modified before the pass completes. A
/// single entry that cannot be read or decoded is passed through unchanged
/// and never aborts the pass.
#[tracing::instrument(skip_all, fields(source = %source.display(), dest = %dest.display()))]
pub fn normalize_container(
	source: &Path,
	dest: &Path,
	options: &NormalizeOptions,
) -> TagmendResult<NormalizeReport> {
	if !source.exists() {
		return Err(TagmendError::NotFound {
			path: source.display().to_string(),
		});
	}

	let mut archive = open_archive(source)?;
	let staged = stage_destination(dest)?;
	let mut writer = ZipWriter::new(BufWriter::new(staged));
	let pass = RewritePass {
		source,
		dest,
		parts: &options.parts,
		families: options.families(),
	};
	let mut report = NormalizeReport::default();

	let comment = archive.comment();
	if !comment.is_empty() {
		writer.set_comment(String::from_utf8_lossy(comment).into_owned());
	}

	for index in 0..archive.len() {
		let entry = pass.rewrite_entry(&mut archive, &mut writer, index)?;

		if let EntryOutcome::Rewritten { reconstructed } = entry.outcome {
			report.reconstructed += reconstructed;
		}

		report.entries.push(entry);
	}

	let buffered = writer
		.finish()
		.map_err(|error| destination_error(dest, error))?;
	let staged = buffered
		.into_inner()
		.map_err(|error| destination_error(dest, error.into_error()))?;
	drop(archive);
	keep_existing_permissions(&staged, dest)?;
	staged
		.persist(dest)
		.map_err(|error| destination_error(dest, error.error))?;

	tracing::debug!(
		reconstructed = report.reconstructed,
		entries = report.entries.len(),
		"normalized container"
	);

	Ok(report)
}

/// The per-entry transform, decided before anything is written.
enum EntryTransform {
	Rewrite {
		content: String,
		options: SimpleFileOptions,
		reconstructed: usize,
	},
	Passthrough(PassthroughReason),
}

struct RewritePass<'a> {
	source: &'a Path,
	dest: &'a Path,
	parts: &'a PartSelector,
	families: Vec<DelimiterFamily>,
}

impl RewritePass<'_> {
	fn rewrite_entry<R: Read + Seek, W: Write + Seek>(
		&self,
		archive: &mut ZipArchive<R>,
		writer: &mut ZipWriter<W>,
		index: usize,
	) -> TagmendResult<EntryReport> {
		let source = self.source;
		let dest = self.dest;
		let name = archive
			.by_index_raw(index)
			.map_err(|error| archive_error(source, error))?
			.name()
			.to_string();

		let transform = if self.parts.is_qualifying(&name) {
			transform_entry(archive, index, &self.families)
		} else {
			EntryTransform::Passthrough(PassthroughReason::NotQualifying)
		};

		let outcome = match transform {
			EntryTransform::Rewrite {
				content,
				options,
				reconstructed,
			} => {
				writer
					.start_file(name.as_str(), options)
					.map_err(|error| destination_error(dest, error))?;
				writer
					.write_all(content.as_bytes())
					.map_err(|error| destination_error(dest, error))?;

				EntryOutcome::Rewritten { reconstructed }
			}
			EntryTransform::Passthrough(reason) => {
				let raw = archive
					.by_index_raw(index)
					.map_err(|error| archive_error(source, error))?;
				writer
					.raw_copy_file(raw)
					.map_err(|error| destination_error(dest, error))?;

				EntryOutcome::Passthrough(reason)
			}
		};

		match &outcome {
			EntryOutcome::Passthrough(
				reason @ (PassthroughReason::InvalidUtf8 { .. } | PassthroughReason::ReadFailed(_)),
			) => {
				tracing::warn!(entry = %name, ?reason, "document part left unchanged");
			}
			_ => tracing::debug!(entry = %name, ?outcome, "processed entry"),
		}

		Ok(EntryReport { name, outcome })
	}
}

/// Decompress and decode a qualifying entry and run the reconstructor over
/// it. Failures here only affect this entry.
fn transform_entry<R: Read + Seek>(
	archive: &mut ZipArchive<R>,
	index: usize,
	families: &[DelimiterFamily],
) -> EntryTransform {
	let (bytes, options) = match read_entry(archive, index) {
		Ok(read) => read,
		Err(error) => {
			return EntryTransform::Passthrough(PassthroughReason::ReadFailed(error.to_string()));
		}
	};

	let text = match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(error) => {
			return EntryTransform::Passthrough(PassthroughReason::InvalidUtf8 {
				valid_up_to: error.utf8_error().valid_up_to(),
			});
		}
	};

	let result = reconstruct_families(&text, families);
	if result.count == 0 {
		return EntryTransform::Passthrough(PassthroughReason::Unchanged);
	}

	EntryTransform::Rewrite {
		content: result.text,
		options,
		reconstructed: result.count,
	}
}

/// Read the decompressed bytes of an entry together with the write options
/// that reproduce its metadata.
fn read_entry<R: Read + Seek>(
	archive: &mut ZipArchive<R>,
	index: usize,
) -> ZipResult<(Vec<u8>, SimpleFileOptions)> {
	let mut entry = archive.by_index(index)?;

	let method = match entry.compression() {
		CompressionMethod::Stored => CompressionMethod::Stored,
		_ => CompressionMethod::Deflated,
	};
	let mut options = SimpleFileOptions::default().compression_method(method);
	if let Some(modified) = entry.last_modified() {
		options = options.last_modified_time(modified);
	}
	if let Some(mode) = entry.unix_mode() {
		options = options.unix_permissions(mode);
	}

	let mut bytes = Vec::with_capacity(entry.size() as usize);
	entry.read_to_end(&mut bytes)?;

	Ok((bytes, options))
}

pub(crate) fn open_archive(path: &Path) -> TagmendResult<ZipArchive<BufReader<File>>> {
	let file = File::open(path)?;
	ZipArchive::new(BufReader::new(file)).map_err(|error| archive_error(path, error))
}

/// Create the temporary file the output is written to, in the same directory
/// as `dest` so the final move is a rename.
fn stage_destination(dest: &Path) -> TagmendResult<NamedTempFile> {
	let parent = dest
		.parent()
		.filter(|parent| !parent.as_os_str().is_empty())
		.unwrap_or_else(|| Path::new("."));

	std::fs::create_dir_all(parent).map_err(|error| destination_error(dest, error))?;

	let mut builder = tempfile::Builder::new();
	builder.prefix(".tagmend-").suffix(".docx");
	// Regular file mode, filtered by the process umask.
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		builder.permissions(std::fs::Permissions::from_mode(0o666));
	}

	builder
		.tempfile_in(parent)
		.map_err(|error| destination_error(dest, error))
}

/// When `dest` already exists, give the staged file its permissions so the
/// rename does not change them.
fn keep_existing_permissions(staged: &NamedTempFile, dest: &Path) -> TagmendResult<()> {
	let Ok(metadata) = std::fs::metadata(dest) else {
		return Ok(());
	};

	staged
		.as_file()
		.set_permissions(metadata.permissions())
		.map_err(|error| destination_error(dest, error))
}

fn archive_error(path: &Path, source: zip::result::ZipError) -> TagmendError {
	TagmendError::Archive {
		path: path.display().to_string(),
		source,
	}
}

fn destination_error(path: &Path, reason: impl Display) -> TagmendError {
	TagmendError::DestinationWrite {
		path: path.display().to_string(),
		reason: reason.to_string(),
	}
}

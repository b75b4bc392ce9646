use std::path::Path;
use std::path::PathBuf;

use crate::NormalizeOptions;
use crate::detect_tags_with;
use crate::normalize_container;

/// File name of the normalized copy written into the work directory.
pub const NORMALIZED_FILE_NAME: &str = "normalized.docx";

/// A template document ready to hand to the substitution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTemplate {
	/// The document to render: the normalized copy, or the original when
	/// normalization failed.
	pub path: PathBuf,
	/// Whether `path` is the normalized copy.
	pub normalized: bool,
	/// Number of placeholders reconstructed. Zero when normalization failed.
	pub reconstructed: usize,
	/// Placeholders found in `path` after normalization.
	pub tags: Vec<String>,
}

/// Normalize `source` into `work_dir` and run the tag census on the result.
///
/// Tag repair is best effort: if normalization fails for any reason the
/// original document is used instead and the failure is only logged. This
/// function never fails.
#[tracing::instrument(skip_all, fields(source = %source.display()))]
pub fn prepare_template(
	source: &Path,
	work_dir: &Path,
	options: &NormalizeOptions,
) -> PreparedTemplate {
	let target = work_dir.join(NORMALIZED_FILE_NAME);

	let (path, normalized, reconstructed) = match normalize_container(source, &target, options) {
		Ok(report) => (target, true, report.reconstructed),
		Err(error) => {
			tracing::warn!(%error, "tag normalization failed, using the original document");
			(source.to_path_buf(), false, 0)
		}
	};

	let tags = detect_tags_with(&path, options);
	if tags.is_empty() {
		tracing::info!("no placeholder tags detected after normalization");
	} else {
		tracing::info!(?tags, "detected placeholder tags");
	}

	PreparedTemplate {
		path,
		normalized,
		reconstructed,
		tags,
	}
}

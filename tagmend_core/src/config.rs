use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::NormalizeOptions;
use crate::PartSelector;
use crate::TagmendError;
use crate::TagmendResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["tagmend.toml", ".tagmend.toml", ".config/tagmend.toml"];

/// Configuration loaded from a `tagmend.toml` file.
///
/// ```toml
/// [delimiters]
/// square = true
///
/// [parts]
/// prefix = "word/"
/// suffix = ".xml"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TagmendConfig {
	/// Which placeholder delimiter families are reconnected.
	#[serde(default)]
	pub delimiters: DelimitersConfig,
	/// Which archive entries are treated as document text. Defaults to
	/// `word/*.xml`.
	#[serde(default)]
	pub parts: PartSelector,
}

#[derive(Debug, Default, Deserialize)]
pub struct DelimitersConfig {
	/// Also reconnect `[[name]]` placeholders. The curly family is always
	/// on.
	#[serde(default)]
	pub square: bool,
}

impl TagmendConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> TagmendResult<Option<TagmendConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit file path.
	pub fn load_file(path: &Path) -> TagmendResult<TagmendConfig> {
		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|e| TagmendError::ConfigParse(e.to_string()))
	}

	pub fn normalize_options(&self) -> NormalizeOptions {
		NormalizeOptions {
			enable_square: self.delimiters.square,
			parts: self.parts.clone(),
		}
	}
}

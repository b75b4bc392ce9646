use serde::Deserialize;

/// Path prefix of the textual document parts inside a `.docx` package.
pub const DOCUMENT_PARTS_PREFIX: &str = "word/";

/// Extension of the markup parts that hold document text.
pub const MARKUP_EXTENSION: &str = ".xml";

/// Decides which archive entries are textual document parts.
///
/// An entry qualifies when its name starts with `prefix` and ends with
/// `suffix`. Everything else (media, fonts, relationship manifests, the
/// content-types manifest) is copied through untouched.
///
/// ```toml
/// [parts]
/// prefix = "word/"
/// suffix = ".xml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartSelector {
	pub prefix: String,
	pub suffix: String,
}

impl Default for PartSelector {
	fn default() -> Self {
		Self {
			prefix: DOCUMENT_PARTS_PREFIX.to_string(),
			suffix: MARKUP_EXTENSION.to_string(),
		}
	}
}

impl PartSelector {
	pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			suffix: suffix.into(),
		}
	}

	/// Returns true if the entry named `name` should be normalized.
	pub fn is_qualifying(&self, name: &str) -> bool {
		name.starts_with(&self.prefix) && name.ends_with(&self.suffix)
	}
}

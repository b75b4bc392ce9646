use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::DelimiterFamily;
use crate::NormalizeOptions;
use crate::TagmendError;
use crate::TagmendResult;
use crate::container::open_archive;
use crate::delimiter::identifier_len;

/// List the distinct `{{name}}` placeholders in the document parts of the
/// container at `path`, in first-seen order.
///
/// This never fails. Any problem reading the container is logged and an
/// empty list is returned.
pub fn detect_tags(path: impl AsRef<Path>) -> Vec<String> {
	detect_tags_with(path, &NormalizeOptions::default())
}

/// Like [`detect_tags`], scanning every family enabled in `options` and
/// using its part selector. Within one entry, curly matches are listed
/// before square matches.
pub fn detect_tags_with(path: impl AsRef<Path>, options: &NormalizeOptions) -> Vec<String> {
	let path = path.as_ref();

	match collect_tags(path, options) {
		Ok(tags) => tags,
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "tag detection failed");
			Vec::new()
		}
	}
}

fn collect_tags(path: &Path, options: &NormalizeOptions) -> TagmendResult<Vec<String>> {
	let mut archive = open_archive(path)?;
	let families = options.families();
	let mut seen: HashSet<String> = HashSet::new();
	let mut found = Vec::new();

	for index in 0..archive.len() {
		let mut entry = archive
			.by_index(index)
			.map_err(|source| TagmendError::Archive {
				path: path.display().to_string(),
				source,
			})?;

		if !options.parts.is_qualifying(entry.name()) {
			continue;
		}

		let mut bytes = Vec::new();
		entry.read_to_end(&mut bytes)?;
		let text = String::from_utf8_lossy(&bytes);

		for family in &families {
			for name in scan_tags(&text, *family) {
				if !seen.contains(name) {
					seen.insert(name.to_string());
					found.push(name.to_string());
				}
			}
		}
	}

	Ok(found)
}

/// Find every contiguous placeholder of `family` in `text`, in order,
/// including repeats. Whitespace is allowed around the name; markup is not.
pub fn scan_tags(text: &str, family: DelimiterFamily) -> Vec<&str> {
	let opening = family.opening();
	let closing = family.closing();
	let mut names = Vec::new();
	let mut cursor = 0;

	while let Some(found) = text[cursor..].find(opening) {
		let start = cursor + found;
		let name_start = skip_whitespace(text, start + opening.len());
		let name_end = name_start + identifier_len(&text[name_start..]);

		if name_end > name_start {
			let close_start = skip_whitespace(text, name_end);
			if text[close_start..].starts_with(closing) {
				names.push(&text[name_start..name_end]);
				cursor = close_start + closing.len();
				continue;
			}
		}

		cursor = start + 1;
	}

	names
}

fn skip_whitespace(text: &str, position: usize) -> usize {
	let rest = &text[position..];
	position + (rest.len() - rest.trim_start().len())
}

use std::ops::Range;

use crate::delimiter::DelimiterFamily;
use crate::delimiter::is_identifier;

/// The output of running the reconstructor over one block of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
	/// The transformed markup.
	pub text: String,
	/// Number of placeholders rewritten into a different, contiguous form.
	pub count: usize,
}

/// A single match of a fragmented delimiter pair.
///
/// `span` covers both delimiter halves and all the noise between them.
/// `replacement` is `None` when the cleaned interior is not a valid
/// identifier, in which case the span is kept exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
	pub span: Range<usize>,
	pub replacement: Option<String>,
}

/// Reconnect fragmented placeholders in `text`.
///
/// The curly family is always processed first; the square family is
/// processed afterwards, over the curly output, only when `enable_square` is
/// set. The counts of both passes are summed.
pub fn reconstruct(text: &str, enable_square: bool) -> Reconstruction {
	reconstruct_families(text, &DelimiterFamily::enabled(enable_square))
}

/// Like [`reconstruct`], but takes raw bytes. Undecodable sequences are
/// replaced with `U+FFFD` rather than failing.
pub fn reconstruct_lossy(bytes: &[u8], enable_square: bool) -> Reconstruction {
	reconstruct(&String::from_utf8_lossy(bytes), enable_square)
}

/// Run each family over the output of the previous one, in order.
pub fn reconstruct_families(text: &str, families: &[DelimiterFamily]) -> Reconstruction {
	let mut result = Reconstruction {
		text: text.to_string(),
		count: 0,
	};

	for family in families {
		let pass = reconstruct_family(&result.text, *family);
		tracing::debug!(%family, count = pass.count, "reconstructed delimiter family");
		result.text = pass.text;
		result.count += pass.count;
	}

	result
}

/// Reconnect fragmented placeholders of a single delimiter family.
pub fn reconstruct_family(text: &str, family: DelimiterFamily) -> Reconstruction {
	let edits = find_edits(text, family);
	apply_edits(text, &edits)
}

/// Outcome of trying to match a fragmented pair at one opening character.
enum Candidate {
	/// No second opening character after the noise.
	NoOpener,
	/// An opener was found but no closing pair follows it anywhere.
	Unclosed { interior_start: usize },
	/// A full match: the whole span and the raw interior between the halves.
	Matched {
		span: Range<usize>,
		interior: Range<usize>,
	},
}

/// Scan `text` once, left to right, and collect one edit per matched
/// fragmented pair. Matches never overlap: scanning resumes after the end of
/// each match, whether or not the match produced a replacement.
///
/// A match is: open char, any run of markup tags or whitespace, open char,
/// the shortest interior that is followed by a closing pair, where a closing
/// pair is close char, any run of markup tags or whitespace, close char.
pub fn find_edits(text: &str, family: DelimiterFamily) -> Vec<Edit> {
	let open = family.open();
	let mut edits = Vec::new();
	let mut cursor = 0;
	// No closing pair starts at or after this offset.
	let mut unclosed_from: Option<usize> = None;

	while let Some(found) = text[cursor..].find(open) {
		let start = cursor + found;

		match match_candidate(text, start, family, unclosed_from) {
			Candidate::NoOpener => cursor = start + open.len_utf8(),
			Candidate::Unclosed { interior_start } => {
				let from = unclosed_from.map_or(interior_start, |from| from.min(interior_start));
				unclosed_from = Some(from);
				cursor = start + open.len_utf8();
			}
			Candidate::Matched { span, interior } => {
				let replacement =
					clean_interior(&text[interior]).map(|name| family.canonical(&name));
				cursor = span.end;
				edits.push(Edit { span, replacement });
			}
		}
	}

	edits
}

/// Apply `edits` (sorted, non-overlapping) to `text` in a single pass.
///
/// Only replacements that differ from the original span are counted, so an
/// already contiguous placeholder contributes nothing.
pub fn apply_edits(text: &str, edits: &[Edit]) -> Reconstruction {
	let mut output = String::with_capacity(text.len());
	let mut count = 0;
	let mut last = 0;

	for edit in edits {
		output.push_str(&text[last..edit.span.start]);
		let original = &text[edit.span.clone()];

		match &edit.replacement {
			Some(replacement) if replacement != original => {
				output.push_str(replacement);
				count += 1;
			}
			_ => output.push_str(original),
		}

		last = edit.span.end;
	}

	output.push_str(&text[last..]);

	Reconstruction {
		text: output,
		count,
	}
}

fn match_candidate(
	text: &str,
	start: usize,
	family: DelimiterFamily,
	unclosed_from: Option<usize>,
) -> Candidate {
	let open = family.open();
	let close = family.close();

	let second_open = skip_noise(text, start + open.len_utf8());
	if !text[second_open..].starts_with(open) {
		return Candidate::NoOpener;
	}

	let interior_start = second_open + open.len_utf8();
	if unclosed_from.is_some_and(|from| interior_start >= from) {
		return Candidate::Unclosed { interior_start };
	}

	let mut search = interior_start;

	while let Some(found) = text[search..].find(close) {
		let first_close = search + found;
		let second_close = skip_noise(text, first_close + close.len_utf8());

		if text[second_close..].starts_with(close) {
			return Candidate::Matched {
				span: start..second_close + close.len_utf8(),
				interior: interior_start..first_close,
			};
		}

		search = first_close + close.len_utf8();
	}

	Candidate::Unclosed { interior_start }
}

/// Advance past any run of inline markup tags and single whitespace
/// characters starting at `position`.
fn skip_noise(text: &str, mut position: usize) -> usize {
	loop {
		let rest = &text[position..];

		if let Some(len) = markup_tag_len(rest) {
			position += len;
			continue;
		}

		match rest.chars().next() {
			Some(ch) if ch.is_whitespace() => position += ch.len_utf8(),
			_ => return position,
		}
	}
}

/// Length of the inline markup tag at the start of `value`: `<`, one or more
/// characters other than `>`, then `>`.
fn markup_tag_len(value: &str) -> Option<usize> {
	let inner = value.strip_prefix('<')?;
	match inner.find('>') {
		Some(0) | None => None,
		Some(end) => Some(end + 2),
	}
}

/// Strip markup tags, decode the three standard entities and drop all
/// whitespace. Returns the result only when it is a valid identifier.
pub fn clean_interior(raw: &str) -> Option<String> {
	let mut stripped = String::with_capacity(raw.len());
	let mut rest = raw;

	while let Some(tag_start) = rest.find('<') {
		stripped.push_str(&rest[..tag_start]);
		let candidate = &rest[tag_start..];

		if let Some(len) = markup_tag_len(candidate) {
			rest = &candidate[len..];
		} else {
			stripped.push('<');
			rest = &candidate[1..];
		}
	}
	stripped.push_str(rest);

	let decoded = stripped
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&");
	let cleaned: String = decoded.chars().filter(|ch| !ch.is_whitespace()).collect();

	is_identifier(&cleaned).then_some(cleaned)
}

/// A pair of two-character delimiters that bracket a placeholder.
///
/// The curly family (`{{name}}`) is always processed. The square family
/// (`[[name]]`) is opt-in and follows exactly the same cleaning and
/// validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterFamily {
	/// `{{` ... `}}`
	Curly,
	/// `[[` ... `]]`
	Square,
}

impl DelimiterFamily {
	/// The single character repeated to form the opening delimiter.
	pub const fn open(self) -> char {
		match self {
			Self::Curly => '{',
			Self::Square => '[',
		}
	}

	/// The single character repeated to form the closing delimiter.
	pub const fn close(self) -> char {
		match self {
			Self::Curly => '}',
			Self::Square => ']',
		}
	}

	/// The full opening delimiter, e.g. `{{`.
	pub const fn opening(self) -> &'static str {
		match self {
			Self::Curly => "{{",
			Self::Square => "[[",
		}
	}

	/// The full closing delimiter, e.g. `}}`.
	pub const fn closing(self) -> &'static str {
		match self {
			Self::Curly => "}}",
			Self::Square => "]]",
		}
	}

	/// Lowercase name used in logs.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Curly => "curly",
			Self::Square => "square",
		}
	}

	/// The contiguous form of a placeholder, e.g. `{{name}}`.
	pub fn canonical(self, name: &str) -> String {
		let mut output = String::with_capacity(name.len() + 4);
		output.push_str(self.opening());
		output.push_str(name);
		output.push_str(self.closing());
		output
	}

	/// The families to process, in processing order. Curly always comes
	/// first.
	pub fn enabled(enable_square: bool) -> Vec<Self> {
		if enable_square {
			vec![Self::Curly, Self::Square]
		} else {
			vec![Self::Curly]
		}
	}
}

impl std::fmt::Display for DelimiterFamily {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

/// Returns true when `value` is a bare placeholder identifier: a leading
/// ASCII letter or underscore followed by letters, digits, underscores or
/// hyphens.
pub fn is_identifier(value: &str) -> bool {
	!value.is_empty() && identifier_len(value) == value.len()
}

/// Length in bytes of the identifier at the start of `value`, or `0` when
/// `value` does not start with one.
pub fn identifier_len(value: &str) -> usize {
	let bytes = value.as_bytes();
	let Some(first) = bytes.first() else {
		return 0;
	};

	if !(first.is_ascii_alphabetic() || *first == b'_') {
		return 0;
	}

	1 + bytes[1..]
		.iter()
		.take_while(|byte| byte.is_ascii_alphanumeric() || **byte == b'_' || **byte == b'-')
		.count()
}

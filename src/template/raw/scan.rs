use crate::error::{self, ParseError};

/// The literal segments and placeholder markers of a template, in source order.
pub struct Scanned {
	/// The literal text around the markers, one more than there are markers.
	pub segments: Vec<std::ops::Range<usize>>,

	/// The placeholder markers.
	pub markers: Vec<ScannedMarker>,
}

/// A placeholder marker found by the scanner, before index resolution.
pub struct ScannedMarker {
	/// The range of the marker in the source, including braces.
	pub range: std::ops::Range<usize>,

	/// The index written in the marker, if any.
	pub explicit: Option<usize>,
}

/// A successfully parsed placeholder marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Marker {
	/// The index written between the braces, if any.
	pub index: Option<usize>,

	/// The position of the byte after the closing brace.
	pub end: usize,
}

/// The ways a placeholder marker can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerError {
	/// The source ends before the closing brace.
	Unterminated,

	/// A byte other than a digit or closing brace was found at the given position.
	Unexpected { position: usize },

	/// The digits starting at the given position do not fit in a `usize`.
	Overflow { position: usize, len: usize },
}

/// Split the source into literal segments and placeholder markers.
pub fn scan(source: &str) -> Result<Scanned, ParseError> {
	let bytes = source.as_bytes();
	let mut segments = Vec::with_capacity(1);
	let mut markers = Vec::new();
	let mut finger = 0;

	while let Some(offset) = memchr::memchr(b'{', &bytes[finger..]) {
		let open = finger + offset;
		segments.push(finger..open);

		let marker = parse_marker(bytes, open).map_err(|e| to_parse_error(source, open, e))?;
		markers.push(ScannedMarker {
			range: open..marker.end,
			explicit: marker.index,
		});
		finger = marker.end;
	}

	// The trailing segment, possibly empty.
	segments.push(finger..bytes.len());
	Ok(Scanned { segments, markers })
}

/// Parse a single placeholder marker.
///
/// The `open` position must point at the opening brace in the source.
///
/// This is a `const fn` so that templates can be checked at compile time with the exact same grammar.
pub(crate) const fn parse_marker(source: &[u8], open: usize) -> Result<Marker, MarkerError> {
	let digits_start = open + 1;
	let mut finger = digits_start;
	while finger < source.len() && source[finger].is_ascii_digit() {
		finger += 1;
	}

	if finger == source.len() {
		return Err(MarkerError::Unterminated);
	}
	if source[finger] != b'}' {
		return Err(MarkerError::Unexpected { position: finger });
	}

	let end = finger + 1;
	if finger == digits_start {
		return Ok(Marker { index: None, end });
	}

	let mut index: usize = 0;
	let mut digit = digits_start;
	while digit < finger {
		let value = (source[digit] - b'0') as usize;
		index = match index.checked_mul(10) {
			Some(shifted) => match shifted.checked_add(value) {
				Some(index) => index,
				None => return Err(MarkerError::Overflow { position: digits_start, len: finger - digits_start }),
			},
			None => return Err(MarkerError::Overflow { position: digits_start, len: finger - digits_start }),
		};
		digit += 1;
	}

	Ok(Marker { index: Some(index), end })
}

/// Turn a marker error into a full parse error with details from the source.
fn to_parse_error(source: &str, open: usize, error: MarkerError) -> ParseError {
	match error {
		MarkerError::Unterminated => error::MissingClosingBrace { position: open }.into(),
		MarkerError::Unexpected { position } => error::UnexpectedCharacter {
			position,
			// Everything before `position` in the marker is ASCII, so it is on a character boundary.
			character: source[position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
			expected: error::ExpectedCharacter {
				message: "a digit or a closing brace ('}')",
			},
		}
		.into(),
		MarkerError::Overflow { position, len } => error::IndexOverflow { position, len }.into(),
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	fn segments<'a>(source: &'a str, scanned: &Scanned) -> Vec<&'a str> {
		scanned.segments.iter().map(|range| &source[range.clone()]).collect()
	}

	fn explicit(scanned: &Scanned) -> Vec<Option<usize>> {
		scanned.markers.iter().map(|marker| marker.explicit).collect()
	}

	#[test]
	fn test_parse_marker() {
		check!(parse_marker(b"{}", 0) == Ok(Marker { index: None, end: 2 }));
		check!(parse_marker(b"{0}", 0) == Ok(Marker { index: Some(0), end: 3 }));
		check!(parse_marker(b"ab{12}cd", 2) == Ok(Marker { index: Some(12), end: 6 }));
		check!(parse_marker(b"{007}", 0) == Ok(Marker { index: Some(7), end: 5 }));
		check!(parse_marker(b"{", 0) == Err(MarkerError::Unterminated));
		check!(parse_marker(b"{12", 0) == Err(MarkerError::Unterminated));
		check!(parse_marker(b"{ }", 0) == Err(MarkerError::Unexpected { position: 1 }));
		check!(parse_marker(b"{1a}", 0) == Err(MarkerError::Unexpected { position: 2 }));
		check!(parse_marker(b"{-1}", 0) == Err(MarkerError::Unexpected { position: 1 }));
		check!(parse_marker(b"{+1}", 0) == Err(MarkerError::Unexpected { position: 1 }));
		check!(parse_marker(b"{99999999999999999999999}", 0) == Err(MarkerError::Overflow { position: 1, len: 23 }));
	}

	#[test]
	fn scan_without_markers() {
		let source = "no placeholders here";
		let_assert!(Ok(scanned) = scan(source));
		assert!(segments(source, &scanned) == ["no placeholders here"]);
		assert!(scanned.markers.is_empty());

		let_assert!(Ok(scanned) = scan(""));
		assert!(segments("", &scanned) == [""]);
		assert!(scanned.markers.is_empty());
	}

	#[test]
	fn scan_segments_and_markers() {
		let source = "Hello, {}! You are {} years old.";
		let_assert!(Ok(scanned) = scan(source));
		assert!(segments(source, &scanned) == ["Hello, ", "! You are ", " years old."]);
		assert!(explicit(&scanned) == [None, None]);
		assert!(scanned.markers[0].range == (7..9));
		assert!(scanned.markers[1].range == (19..21));

		let source = "{1}{0}";
		let_assert!(Ok(scanned) = scan(source));
		assert!(segments(source, &scanned) == ["", "", ""]);
		assert!(explicit(&scanned) == [Some(1), Some(0)]);
	}

	#[test]
	fn lone_closing_brace_is_literal() {
		let source = "a } b {} c }";
		let_assert!(Ok(scanned) = scan(source));
		assert!(segments(source, &scanned) == ["a } b ", " c }"]);
	}

	#[test]
	fn scan_reports_first_error() {
		let source = "Hello {name} and {0";
		let_assert!(Err(ParseError::UnexpectedCharacter(e)) = scan(source));
		check!(e.position == 7);
		check!(e.character == 'n');
	}

	#[test]
	fn test_missing_closing_brace() {
		let source = "Hello {0";
		let_assert!(Err(e) = scan(source));
		assert!(e.to_string() == "Missing closing brace");
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {0\n",
			"        ^\n",
		));
	}

	#[test]
	fn test_unexpected_character() {
		let source = "Hello {name}!";
		let_assert!(Err(e) = scan(source));
		assert!(e.to_string() == "Unexpected character: 'n', expected a digit or a closing brace ('}')");
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {name}!\n",
			"         ^\n",
		));

		let source = "Hello {1❤}";
		let_assert!(Err(e) = scan(source));
		assert!(e.to_string() == "Unexpected character: '❤', expected a digit or a closing brace ('}')");
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {1❤}\n",
			"          ^\n",
		));

		let source = "Hello {{}}";
		let_assert!(Err(e) = scan(source));
		assert!(e.to_string() == "Unexpected character: '{', expected a digit or a closing brace ('}')");
	}

	#[test]
	fn test_index_overflow() {
		let source = "{99999999999999999999999}";
		let_assert!(Err(e) = scan(source));
		assert!(e.to_string() == "Placeholder index is too large");
		assert!(e.source_highlighting(source) == concat!(
			"  {99999999999999999999999}\n",
			"   ^^^^^^^^^^^^^^^^^^^^^^^\n",
		));
	}
}

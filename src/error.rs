//! Module containing error details.

use crate::template::IndexingMode;

/// An error that can occur while formatting a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The template could not be analyzed.
	Parse(ParseError),

	/// The template could not be rendered with the given arguments.
	Render(RenderError),
}

impl From<ParseError> for Error {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Parse(other)
	}
}

impl From<RenderError> for Error {
	#[inline]
	fn from(other: RenderError) -> Self {
		Self::Render(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Render(e) => e.fmt(f),
		}
	}
}

/// An error that can occur while analyzing a template.
///
/// All of these are structural problems of the template text itself:
/// they are detected before any argument is looked at.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ParseError {
	/// The template contains a placeholder without a closing brace (`"{0"`).
	MissingClosingBrace(MissingClosingBrace),

	/// The template contains a placeholder with something other than digits (`"{name}"`).
	UnexpectedCharacter(UnexpectedCharacter),

	/// The template contains a placeholder index that does not fit in a `usize`.
	IndexOverflow(IndexOverflow),

	/// The template uses both implicit (`"{}"`) and explicit (`"{0}"`) placeholders.
	MixedIndexingMode(MixedIndexingMode),

	/// The explicit placeholder indices of the template skip an argument.
	GapInIndices(GapInIndices),
}

impl From<MissingClosingBrace> for ParseError {
	#[inline]
	fn from(other: MissingClosingBrace) -> Self {
		Self::MissingClosingBrace(other)
	}
}

impl From<UnexpectedCharacter> for ParseError {
	#[inline]
	fn from(other: UnexpectedCharacter) -> Self {
		Self::UnexpectedCharacter(other)
	}
}

impl From<IndexOverflow> for ParseError {
	#[inline]
	fn from(other: IndexOverflow) -> Self {
		Self::IndexOverflow(other)
	}
}

impl From<MixedIndexingMode> for ParseError {
	#[inline]
	fn from(other: MixedIndexingMode) -> Self {
		Self::MixedIndexingMode(other)
	}
}

impl From<GapInIndices> for ParseError {
	#[inline]
	fn from(other: GapInIndices) -> Self {
		Self::GapInIndices(other)
	}
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::MissingClosingBrace(e) => e.fmt(f),
			Self::UnexpectedCharacter(e) => e.fmt(f),
			Self::IndexOverflow(e) => e.fmt(f),
			Self::MixedIndexingMode(e) => e.fmt(f),
			Self::GapInIndices(e) => e.fmt(f),
		}
	}
}

/// An error that can occur while rendering an analyzed template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum RenderError {
	/// The number of arguments does not match the number of distinct placeholder indices.
	ArgumentCountMismatch(ArgumentCountMismatch),

	/// An argument failed to convert itself to text.
	ConversionFailure(ConversionFailure),
}

impl From<ArgumentCountMismatch> for RenderError {
	#[inline]
	fn from(other: ArgumentCountMismatch) -> Self {
		Self::ArgumentCountMismatch(other)
	}
}

impl From<ConversionFailure> for RenderError {
	#[inline]
	fn from(other: ConversionFailure) -> Self {
		Self::ConversionFailure(other)
	}
}

impl std::error::Error for RenderError {}

impl std::fmt::Display for RenderError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ArgumentCountMismatch(e) => e.fmt(f),
			Self::ConversionFailure(e) => e.fmt(f),
		}
	}
}

/// An error that can occur while writing a formatted template to a sink.
#[derive(Debug)]
pub enum PrintError {
	/// The template could not be formatted, nothing was written.
	Format(Error),

	/// Writing to the sink failed.
	Io(std::io::Error),
}

impl From<Error> for PrintError {
	#[inline]
	fn from(other: Error) -> Self {
		Self::Format(other)
	}
}

impl From<ParseError> for PrintError {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Format(other.into())
	}
}

impl From<RenderError> for PrintError {
	#[inline]
	fn from(other: RenderError) -> Self {
		Self::Format(other.into())
	}
}

impl From<std::io::Error> for PrintError {
	#[inline]
	fn from(other: std::io::Error) -> Self {
		Self::Io(other)
	}
}

impl std::error::Error for PrintError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Format(e) => Some(e),
			Self::Io(e) => Some(e),
		}
	}
}

impl std::fmt::Display for PrintError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Format(e) => e.fmt(f),
			Self::Io(e) => write!(f, "Failed to write formatted output: {}", e),
		}
	}
}

/// The template contains a placeholder without a closing brace.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MissingClosingBrace {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the `{` character that is missing a closing brace.
	pub position: usize,
}

impl std::error::Error for MissingClosingBrace {}

impl std::fmt::Display for MissingClosingBrace {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Missing closing brace")
	}
}

/// The template contains an unexpected character inside a placeholder.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnexpectedCharacter {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the unexpected character in the template.
	pub position: usize,

	/// The unexpected character.
	pub character: char,

	/// A human readable message about what was expected instead.
	pub expected: ExpectedCharacter,
}

impl std::error::Error for UnexpectedCharacter {}

impl std::fmt::Display for UnexpectedCharacter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Unexpected character: {:?}, expected {}",
			self.character,
			self.expected.message()
		)
	}
}

/// A struct to describe what was expected instead of the unexpected character.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ExpectedCharacter {
	/// A human readable message to describe what is expected.
	pub(crate) message: &'static str,
}

impl ExpectedCharacter {
	/// Get a human readable message to describe what was expected.
	pub fn message(&self) -> &str {
		self.message
	}
}

/// The template contains a placeholder index that does not fit in a `usize`.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct IndexOverflow {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first digit of the index.
	pub position: usize,

	/// The number of digits of the index.
	pub len: usize,
}

impl std::error::Error for IndexOverflow {}

impl std::fmt::Display for IndexOverflow {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Placeholder index is too large")
	}
}

/// The template uses both implicit and explicit placeholders.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MixedIndexingMode {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the `{` of the first placeholder that does not match
	/// the indexing mode established by the first placeholder.
	pub position: usize,

	/// The length of the conflicting placeholder in bytes.
	pub len: usize,

	/// The indexing mode established by the first placeholder.
	pub mode: IndexingMode,
}

impl std::error::Error for MixedIndexingMode {}

impl std::fmt::Display for MixedIndexingMode {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let (expected, found) = match self.mode {
			IndexingMode::Implicit => ("{}", "{N}"),
			IndexingMode::Explicit => ("{N}", "{}"),
		};
		write!(
			f,
			"Mixed placeholder indexing: found '{}' in a template that uses '{}'",
			found, expected
		)
	}
}

/// The explicit placeholder indices of the template skip an argument.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct GapInIndices {
	/// The smallest argument index that is not used by any placeholder.
	pub missing: usize,

	/// The largest argument index used by a placeholder.
	pub max: usize,
}

impl std::error::Error for GapInIndices {}

impl std::fmt::Display for GapInIndices {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"No placeholder for argument {}, indices must cover 0 to {}",
			self.missing, self.max
		)
	}
}

/// The number of arguments does not match the template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ArgumentCountMismatch {
	/// The number of arguments required by the template.
	pub expected: usize,

	/// The number of arguments that were supplied.
	pub actual: usize,
}

impl std::error::Error for ArgumentCountMismatch {}

impl std::fmt::Display for ArgumentCountMismatch {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Wrong number of arguments: template expects {}, got {}",
			self.expected, self.actual
		)
	}
}

/// An argument failed to convert itself to text.
///
/// Only arguments converted through [`std::fmt::Display`] can fail.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ConversionFailure {
	/// The index of the argument that failed to convert.
	pub argument: usize,

	/// The byte offset within the template of the placeholder being rendered.
	pub position: usize,
}

impl std::error::Error for ConversionFailure {}

impl std::fmt::Display for ConversionFailure {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Failed to convert argument {} to text", self.argument)
	}
}

impl ParseError {
	/// Get the range in the template that contains the error.
	///
	/// Returns `None` for errors that are not tied to a single location, like [`GapInIndices`].
	pub fn source_range(&self) -> Option<std::ops::Range<usize>> {
		let (start, len) = match &self {
			Self::MissingClosingBrace(e) => (e.position, 1),
			Self::UnexpectedCharacter(e) => (e.position, e.character.len_utf8()),
			Self::IndexOverflow(e) => (e.position, e.len),
			Self::MixedIndexingMode(e) => (e.position, e.len),
			Self::GapInIndices(_) => return None,
		};
		Some(std::ops::Range {
			start,
			end: start + len,
		})
	}

	/// Get the line of the template that contains the error.
	///
	/// Returns an empty string for errors without a location.
	///
	/// # Panics
	/// May panic if the source text is not the original template that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let Some(range) = self.source_range() else {
			return "";
		};
		let start = line_start(source, range.start);
		let end = line_end(source, range.start);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the error has no location,
	/// or if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let Some(range) = self.source_range() else {
			return Ok(());
		};
		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}
		let line_start = line_start(source, range.start);
		let range = range.start - line_start..(range.end - line_start).min(line.len());
		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, range)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}

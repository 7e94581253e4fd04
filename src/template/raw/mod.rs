mod render;
mod resolve;
mod scan;

pub(crate) use scan::parse_marker;

use crate::error::ParseError;

/// Raw analyzed template that doesn't track the original source.
///
/// Internally, this keeps a bunch of offsets into the original source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
	/// The literal text between placeholders.
	///
	/// There is always exactly one more segment than there are placeholders.
	segments: Vec<std::ops::Range<usize>>,

	/// The placeholders in source order, with their resolved argument index.
	placeholders: Vec<Placeholder>,

	/// The indexing mode of the template, if it has any placeholders.
	mode: Option<IndexingMode>,

	/// The number of arguments the template must be rendered with.
	argument_count: usize,
}

/// How the placeholders of a template select their argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexingMode {
	/// All placeholders are `{}` and take the arguments in order.
	Implicit,

	/// All placeholders are `{N}` and name their argument.
	Explicit,
}

/// A placeholder of an analyzed template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
	/// The range of the whole placeholder (including braces) in the source.
	range: std::ops::Range<usize>,

	/// The index written in the placeholder, if any.
	explicit: Option<usize>,

	/// The index of the argument substituted for this placeholder.
	index: usize,
}

impl Placeholder {
	/// The byte range of the placeholder in the template, including the braces.
	#[inline]
	pub fn source_range(&self) -> std::ops::Range<usize> {
		self.range.clone()
	}

	/// The index written between the braces, or `None` for `{}`.
	#[inline]
	pub fn explicit_index(&self) -> Option<usize> {
		self.explicit
	}

	/// The index of the argument that will be substituted for this placeholder.
	#[inline]
	pub fn index(&self) -> usize {
		self.index
	}
}

impl Template {
	/// Analyze a template: scan it for placeholders and resolve their argument indices.
	pub fn parse(source: &str) -> Result<Self, ParseError> {
		let scan::Scanned { segments, markers } = scan::scan(source)?;
		let resolve::Resolved {
			placeholders,
			mode,
			argument_count,
		} = resolve::resolve(markers)?;
		tracing::trace!(
			placeholders = placeholders.len(),
			?mode,
			argument_count,
			"analyzed template"
		);
		Ok(Self {
			segments,
			placeholders,
			mode,
			argument_count,
		})
	}

	/// The placeholders in source order.
	#[inline]
	pub fn placeholders(&self) -> &[Placeholder] {
		&self.placeholders
	}

	/// The literal text between placeholders, as byte ranges into the source.
	#[inline]
	pub fn segments(&self) -> &[std::ops::Range<usize>] {
		&self.segments
	}

	/// The indexing mode, or `None` if there are no placeholders.
	#[inline]
	pub fn mode(&self) -> Option<IndexingMode> {
		self.mode
	}

	/// The number of arguments needed to render the template.
	#[inline]
	pub fn argument_count(&self) -> usize {
		self.argument_count
	}
}

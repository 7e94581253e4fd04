use std::borrow::Cow;

use crate::convert::Arg;
use crate::error::{ParseError, RenderError};

mod raw;

pub use raw::{IndexingMode, Placeholder};
pub(crate) use raw::parse_marker;

/// An analyzed template that borrows the source string.
///
/// You can analyze the template once and call [`Self::render()`] multiple times.
/// This is generally more efficient than calling [`format()`][crate::format] multiple times on the same string.
///
/// This template borrows the source string.
/// You can use [`TemplateBuf`] if you need a template that owns the source string.
#[derive(Clone, PartialEq, Eq)]
pub struct Template<'a> {
	source: &'a str,
	raw: Cow<'a, raw::Template>,
}

impl std::fmt::Debug for Template<'_> {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl<'a> Template<'a> {
	/// Analyze a template from a string slice.
	///
	/// Placeholders have the form `{}` or `{N}`, where `N` is a decimal argument index.
	/// A template must use only one of the two forms.
	/// With `{N}`, every index from zero up to the largest one must be used at least once.
	///
	/// Only an opening brace starts a placeholder, a lone `}` is literal text.
	/// There is no way to escape an opening brace.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(source: &'a str) -> Result<Self, ParseError> {
		Ok(Self {
			source,
			raw: Cow::Owned(raw::Template::parse(source)?),
		})
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &'a str {
		self.source
	}

	/// Get the indexing mode of the template, or `None` if it has no placeholders.
	#[inline]
	pub fn mode(&self) -> Option<IndexingMode> {
		self.raw.mode()
	}

	/// Get the number of arguments the template must be rendered with.
	#[inline]
	pub fn argument_count(&self) -> usize {
		self.raw.argument_count()
	}

	/// Get the placeholders in source order.
	#[inline]
	pub fn placeholders(&self) -> &[Placeholder] {
		self.raw.placeholders()
	}

	/// Iterate over the literal text around the placeholders.
	///
	/// There is always one more segment than there are placeholders.
	/// Segments may be empty.
	pub fn segments(&self) -> impl Iterator<Item = &'a str> + '_ {
		let source = self.source;
		self.raw.segments().iter().map(move |range| &source[range.clone()])
	}

	/// Check that the template can be rendered with the given number of arguments.
	#[inline]
	pub fn check_argument_count(&self, actual: usize) -> Result<(), RenderError> {
		self.raw.check_argument_count(actual)
	}

	/// Render the template.
	///
	/// Every placeholder is replaced by the text of the argument it selects.
	/// Use [`arg!`][crate::arg] to create the arguments.
	pub fn render(&self, args: &[Arg<'_>]) -> Result<String, RenderError> {
		let mut output = String::with_capacity(self.source.len() + self.source.len() / 2);
		self.render_into(&mut output, args)?;
		Ok(output)
	}

	/// Render the template by appending to an existing string.
	///
	/// If rendering fails, the string is left as it was.
	#[inline]
	pub fn render_into(&self, output: &mut String, args: &[Arg<'_>]) -> Result<(), RenderError> {
		self.raw.render_into(output, self.source, args)
	}
}

/// An analyzed template that owns the source string.
///
/// You can analyze the template once and call [`Self::render()`] multiple times.
/// This is generally more efficient than calling [`format()`][crate::format] multiple times on the same string.
///
/// This template owns the source string.
/// If you do not need ownership, you can also use [`Template`] to borrow it instead.
#[derive(Clone, PartialEq, Eq)]
pub struct TemplateBuf {
	source: String,
	raw: raw::Template,
}

impl std::fmt::Debug for TemplateBuf {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("TemplateBuf").field(&self.source).finish()
	}
}

impl TemplateBuf {
	/// Analyze a template from a string.
	///
	/// This takes ownership of the string.
	/// See [`Template::from_str()`] for the template syntax.
	#[inline]
	pub fn from_string(source: String) -> Result<Self, ParseError> {
		let raw = raw::Template::parse(&source)?;
		Ok(Self { source, raw })
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Consume the template to get the original source string.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Borrow the template.
	#[inline]
	pub fn as_template(&self) -> Template<'_> {
		Template {
			source: &self.source,
			raw: Cow::Borrowed(&self.raw),
		}
	}

	/// Render the template.
	///
	/// See [`Template::render()`].
	#[inline]
	pub fn render(&self, args: &[Arg<'_>]) -> Result<String, RenderError> {
		self.as_template().render(args)
	}
}

impl<'a> From<&'a TemplateBuf> for Template<'a> {
	#[inline]
	fn from(other: &'a TemplateBuf) -> Self {
		other.as_template()
	}
}

impl From<&Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: &Template<'_>) -> Self {
		Self {
			source: other.source.into(),
			raw: other.raw.as_ref().clone(),
		}
	}
}

impl From<Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: Template<'_>) -> Self {
		Self {
			source: other.source.into(),
			raw: other.raw.into_owned(),
		}
	}
}

//! Positional format templates, checked at compile time.
//!
//! # Features
//!
//! * Implicit placeholders: `"Hello, {}! You are {} years old."`
//! * Explicit placeholders: `"{1} before {0}"`, an index may be used more than once.
//! * Templates are checked at compile time with [`tformat!`]: malformed placeholders,
//!   mixed placeholder styles, unused indices and a wrong number of arguments fail the build.
//! * Arguments are converted to text with the best available strategy for their type:
//!   numbers first, then text, then [`Display`][std::fmt::Display].
//! * Templates can be analyzed once and rendered many times with [`Template`] and [`TemplateBuf`],
//!   or shared between threads with a [`TemplateCache`].
//! * Serialize and deserialize templates (optional, requires the `serde` feature).
//!
//! A template must use either only `{}` placeholders or only `{N}` placeholders.
//! With `{N}` placeholders, every index from zero to the largest index must be used.
//! There is no escape syntax: an opening brace always starts a placeholder.
//! A closing brace on its own is just text.
//!
//! # Examples
//!
//! The [`tformat!`] macro checks the template at compile time and formats the arguments.
//!
//! ```
//! # fn main() -> Result<(), posfmt::Error> {
//! assert_eq!(posfmt::tformat!("Hello, {}! You are {} years old.", "Ada", 36)?, "Hello, Ada! You are 36 years old.");
//! assert_eq!(posfmt::tformat!("{0} and {0}", 'x')?, "x and x");
//! # Ok(())
//! # }
//! ```
//!
//! Templates that are only known at runtime can be formatted with the [`format()`] function.
//! Use [`arg!`] to turn values into arguments.
//!
//! ```
//! # fn main() -> Result<(), posfmt::Error> {
//! use posfmt::arg;
//!
//! let template = String::from("{1} before {0}");
//! assert_eq!(posfmt::format(&template, &[arg!("b"), arg!("a")])?, "a before b");
//! # Ok(())
//! # }
//! ```
//!
//! Errors in runtime templates report where in the template they occurred.
//!
//! ```
//! let error = posfmt::Template::from_str("Hello, {name}!").unwrap_err();
//! assert_eq!(error.to_string(), "Unexpected character: 'n', expected a digit or a closing brace ('}')");
//! assert_eq!(error.source_highlighting("Hello, {name}!"), "  Hello, {name}!\n          ^\n");
//! ```
//!
//! The [`tprintln!`] family of macros writes the result to standard output or any [`std::io::Write`] sink.
//!
//! ```
//! # fn main() -> Result<(), posfmt::PrintError> {
//! posfmt::tprintln!("{} + {} = {}", 1, 2, 3)?;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::{Error, ParseError, PrintError, RenderError};

mod template;
pub use template::*;

pub mod cache;
pub use cache::TemplateCache;

pub mod compiletime;

pub mod convert;
pub use convert::{Arg, Numeric, Strategy, Textual};

pub mod output;

mod features;

mod macros;

/// Format a template with the given arguments.
///
/// The template is analyzed and rendered in one go.
/// If you format the same template many times, consider analyzing it once with [`Template::from_str()`],
/// using a [`TemplateCache`], or using the [`tformat!`] macro for templates known at compile time.
///
/// Use [`arg!`] to create the arguments.
pub fn format(source: &str, args: &[Arg<'_>]) -> Result<String, Error> {
	let template = Template::from_str(source)?;
	Ok(template.render(args)?)
}

#[cfg(test)]
mod test {
	use assert2::{assert, check, let_assert};
	use super::*;

	struct Temperature(f64);

	impl std::fmt::Display for Temperature {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			write!(f, "{:.1}°C", self.0)
		}
	}

	#[test]
	fn test_format() {
		check!(let Ok("Hello, Ada! You are 36 years old.") = format("Hello, {}! You are {} years old.", &[arg!("Ada"), arg!(36)]).as_deref());
		check!(let Ok("a before b") = format("{1} before {0}", &[arg!("b"), arg!("a")]).as_deref());
		check!(let Ok("x and x") = format("{0} and {0}", &[arg!("x")]).as_deref());
		check!(let Ok("no placeholders here") = format("no placeholders here", &[]).as_deref());
		check!(let Ok("it is 21.5°C, true") = format("it is {}, {}", &[arg!(Temperature(21.5)), arg!(true)]).as_deref());
	}

	#[test]
	fn test_structural_errors() {
		let_assert!(Err(Error::Parse(ParseError::MixedIndexingMode(e))) = format("{} and {1}", &[arg!(1), arg!(2)]));
		check!(e.position == 7);

		let_assert!(Err(Error::Parse(ParseError::GapInIndices(e))) = format("{0} and {2}", &[arg!(1), arg!(2), arg!(3)]));
		check!(e.missing == 1);

		let_assert!(Err(Error::Parse(ParseError::MissingClosingBrace(e))) = format("Hello {0", &[arg!(1)]));
		check!(e.position == 6);
	}

	#[test]
	fn test_argument_count_mismatch() {
		let_assert!(Err(Error::Render(RenderError::ArgumentCountMismatch(e))) = format("{} and {}", &[arg!("x")]));
		check!(e.expected == 2);
		check!(e.actual == 1);

		let_assert!(Err(Error::Render(RenderError::ArgumentCountMismatch(e))) = format("{0} and {0}", &[arg!("x"), arg!("y")]));
		check!(e.expected == 1);
		check!(e.actual == 2);
	}

	#[test]
	fn repeated_index_renders_identical_text() {
		let_assert!(Ok(text) = format("[{0}|{1}|{0}]", &[arg!(0.1), arg!('-')]));
		assert!(text == "[0.1|-|0.1]");
	}

	#[test]
	fn reanalysis_is_deterministic() {
		let source = "{2}{0}{1}{2}";
		let_assert!(Ok(first) = Template::from_str(source));
		let_assert!(Ok(second) = Template::from_str(source));
		assert!(first == second);
		assert!(first.placeholders() == second.placeholders());
	}

	#[test]
	fn rendering_is_deterministic() {
		let_assert!(Ok(template) = Template::from_str("{1} {0} {1}"));
		let args = [arg!(2.5), arg!("twice")];
		let_assert!(Ok(first) = template.render(&args));
		let_assert!(Ok(second) = template.render(&args));
		assert!(first == second);
		assert!(first == "twice 2.5 twice");
	}

	#[test]
	fn call_site_is_shared_between_threads() {
		let results: Vec<_> = std::thread::scope(|scope| {
			let handles: Vec<_> = (0..8).map(|i| scope.spawn(move || (i, tformat!("worker {} of {}", i, 8)))).collect();
			handles.into_iter().map(|handle| handle.join()).collect()
		});

		check!(results.len() == 8);
		for result in results {
			let_assert!(Ok((i, Ok(text))) = result);
			assert!(text == std::format!("worker {i} of 8"));
		}
	}

	#[test]
	fn text_without_braces_is_unchanged() {
		let source = "plain text } with a closing brace and ünïcödé";
		let_assert!(Ok(text) = format(source, &[]));
		assert!(text == source);
	}

	#[test]
	fn macro_and_function_agree() {
		let_assert!(Ok(from_macro) = tformat!("{1}: {0} ({2})", 42u8, "answer", 'a'));
		let_assert!(Ok(from_function) = format("{1}: {0} ({2})", &[arg!(42u8), arg!("answer"), arg!('a')]));
		assert!(from_macro == from_function);
		assert!(from_macro == "answer: 42 (a)");
	}
}

use super::Template;
use crate::convert::Arg;
use crate::error::{self, RenderError};

impl Template {
	/// Check that the template can be rendered with the given number of arguments.
	pub fn check_argument_count(&self, actual: usize) -> Result<(), RenderError> {
		if actual == self.argument_count {
			Ok(())
		} else {
			Err(error::ArgumentCountMismatch {
				expected: self.argument_count,
				actual,
			}
			.into())
		}
	}

	/// Render the template into the output string.
	///
	/// The argument count is checked before any argument is converted.
	/// If an error occurs, the output is truncated to its original length.
	pub fn render_into(&self, output: &mut String, source: &str, args: &[Arg<'_>]) -> Result<(), RenderError> {
		self.check_argument_count(args.len())?;

		let start = output.len();
		if let Err(e) = self.render_unchecked(output, source, args) {
			output.truncate(start);
			return Err(e);
		}
		Ok(())
	}

	/// Interleave the literal segments with the converted arguments.
	///
	/// The caller must have checked the argument count.
	fn render_unchecked(&self, output: &mut String, source: &str, args: &[Arg<'_>]) -> Result<(), RenderError> {
		// Every placeholder is followed by a segment, the first segment stands alone.
		let (first, rest) = match self.segments.split_first() {
			Some(x) => x,
			None => return Ok(()),
		};

		output.push_str(&source[first.clone()]);
		for (placeholder, segment) in self.placeholders.iter().zip(rest) {
			args[placeholder.index]
				.write_to(output)
				.map_err(|_| error::ConversionFailure {
					argument: placeholder.index,
					position: placeholder.range.start,
				})?;
			output.push_str(&source[segment.clone()]);
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::arg;
	use assert2::{assert, check, let_assert};

	struct Broken;

	impl std::fmt::Display for Broken {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.write_str("half")?;
			Err(std::fmt::Error)
		}
	}

	fn render(source: &str, args: &[Arg<'_>]) -> Result<String, RenderError> {
		let_assert!(Ok(template) = Template::parse(source));
		let mut output = String::new();
		template.render_into(&mut output, source, args)?;
		Ok(output)
	}

	#[test]
	fn render_verbatim() {
		check!(let Ok("no placeholders here") = render("no placeholders here", &[]).as_deref());
		check!(let Ok("") = render("", &[]).as_deref());
	}

	#[test]
	fn render_interleaves_segments() {
		let source = "Hello, {}! You are {} years old.";
		check!(let Ok("Hello, Ada! You are 36 years old.") = render(source, &[arg!("Ada"), arg!(36)]).as_deref());
		check!(let Ok("a before b") = render("{1} before {0}", &[arg!("b"), arg!("a")]).as_deref());
		check!(let Ok("x and x") = render("{0} and {0}", &[arg!("x")]).as_deref());
		check!(let Ok("12") = render("{}{}", &[arg!(1), arg!(2)]).as_deref());
	}

	#[test]
	fn argument_count_is_checked_first() {
		let_assert!(Err(RenderError::ArgumentCountMismatch(e)) = render("no placeholders here", &[arg!(1)]));
		check!(e.expected == 0);
		check!(e.actual == 1);

		// The broken argument is never converted.
		let_assert!(Err(RenderError::ArgumentCountMismatch(e)) = render("{} {}", &[Arg::display(&Broken)]));
		check!(e.expected == 2);
		check!(e.actual == 1);
	}

	#[test]
	fn conversion_failure_leaves_output_untouched() {
		let source = "first {} then {}";
		let_assert!(Ok(template) = Template::parse(source));
		let mut output = String::from("prefix: ");
		let_assert!(Err(RenderError::ConversionFailure(e)) = template.render_into(&mut output, source, &[arg!(1), Arg::display(&Broken)]));
		check!(e.argument == 1);
		check!(e.position == 14);
		assert!(output == "prefix: ");
	}
}

//! Writing formatted text to byte sinks.
//!
//! The template is always rendered completely before anything is written,
//! so a template or conversion error never produces partial output.
//! The rendered text is then written with a single [`write_all()`][std::io::Write::write_all] call.

use std::io::Write;

use crate::convert::Arg;
use crate::error::{Error, PrintError};

/// Format a template and write the result to a sink.
///
/// ```
/// # fn main() -> Result<(), posfmt::PrintError> {
/// use posfmt::arg;
///
/// let mut output = Vec::new();
/// posfmt::output::write(&mut output, "{1}{0}", &[arg!('a'), arg!('b')])?;
/// assert_eq!(output, b"ba");
/// # Ok(())
/// # }
/// ```
pub fn write<W: Write + ?Sized>(sink: &mut W, template: &str, args: &[Arg<'_>]) -> Result<(), PrintError> {
	emit(sink, crate::format(template, args), false)
}

/// Format a template and write the result to a sink, followed by a newline.
pub fn writeln<W: Write + ?Sized>(sink: &mut W, template: &str, args: &[Arg<'_>]) -> Result<(), PrintError> {
	emit(sink, crate::format(template, args), true)
}

/// Format a template and write the result to standard output.
///
/// Standard output is only locked after formatting is done.
pub fn print(template: &str, args: &[Arg<'_>]) -> Result<(), PrintError> {
	emit_stdout(crate::format(template, args), false)
}

/// Format a template and write the result to standard output, followed by a newline.
pub fn println(template: &str, args: &[Arg<'_>]) -> Result<(), PrintError> {
	emit_stdout(crate::format(template, args), true)
}

/// Write an already formatted result to a sink.
///
/// If formatting failed, nothing is written and the error is returned.
/// Otherwise the text (and optionally a newline) is written with a single call to [`Write::write_all()`].
///
/// This is used by the [`twrite!`][crate::twrite] family of macros.
pub fn emit<W: Write + ?Sized>(sink: &mut W, formatted: Result<String, Error>, newline: bool) -> Result<(), PrintError> {
	let mut text = formatted?;
	if newline {
		text.push('\n');
	}
	sink.write_all(text.as_bytes()).map_err(|e| {
		tracing::debug!(error = %e, len = text.len(), "failed to write formatted output");
		PrintError::Io(e)
	})
}

/// Write an already formatted result to standard output.
///
/// Standard output is locked for the single write only.
/// This is used by the [`tprint!`][crate::tprint] and [`tprintln!`][crate::tprintln] macros.
pub fn emit_stdout(formatted: Result<String, Error>, newline: bool) -> Result<(), PrintError> {
	let text = formatted?;
	emit(&mut std::io::stdout().lock(), Ok(text), newline)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::arg;
	use crate::error::{ParseError, RenderError};
	use assert2::{assert, check, let_assert};

	/// A sink that records how often it is written to, and optionally fails.
	#[derive(Default)]
	struct Sink {
		data: Vec<u8>,
		writes: usize,
		fail: bool,
	}

	impl Write for Sink {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			self.writes += 1;
			if self.fail {
				return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"));
			}
			self.data.extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn write_renders_before_writing() {
		let mut sink = Sink::default();
		let_assert!(Ok(()) = write(&mut sink, "Hello, {}! You are {} years old.", &[arg!("Ada"), arg!(36)]));
		assert!(sink.data == b"Hello, Ada! You are 36 years old.");
		check!(sink.writes == 1);
	}

	#[test]
	fn writeln_appends_newline() {
		let mut sink = Vec::new();
		let_assert!(Ok(()) = writeln(&mut sink, "{0} and {0}", &[arg!("x")]));
		let_assert!(Ok(()) = writeln(&mut sink, "done", &[]));
		assert!(sink == b"x and x\ndone\n");
	}

	#[test]
	fn format_errors_write_nothing() {
		let mut sink = Sink::default();
		let_assert!(Err(PrintError::Format(Error::Parse(ParseError::GapInIndices(_)))) = write(&mut sink, "{0} and {2}", &[arg!(1), arg!(2), arg!(3)]));
		let_assert!(Err(PrintError::Format(Error::Render(RenderError::ArgumentCountMismatch(_)))) = writeln(&mut sink, "{}", &[]));
		check!(sink.writes == 0);
		check!(sink.data.is_empty());
	}

	#[test]
	fn sink_failure_is_propagated() {
		let mut sink = Sink {
			fail: true,
			..Sink::default()
		};
		let_assert!(Err(PrintError::Io(e)) = writeln(&mut sink, "{}", &[arg!(1)]));
		check!(e.kind() == std::io::ErrorKind::BrokenPipe);
		check!(sink.writes == 1);
	}

	/// Locks standard output from another thread while being formatted.
	struct LocksStdout;

	impl std::fmt::Display for LocksStdout {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			let joined = std::thread::scope(|scope| scope.spawn(|| drop(std::io::stdout().lock())).join());
			f.write_str(if joined.is_ok() { "unlocked" } else { "failed" })
		}
	}

	#[test]
	fn stdout_is_not_locked_while_formatting() {
		let_assert!(Ok(()) = print("", &[]));
		let_assert!(Ok(()) = println("stdout {}", &[arg!(LocksStdout)]));
		let_assert!(Ok(()) = crate::tprintln!("stdout {}", LocksStdout));
		let_assert!(Err(PrintError::Format(Error::Render(RenderError::ArgumentCountMismatch(_)))) = emit_stdout(crate::format("{}", &[]), true));
	}

	#[test]
	fn write_to_dyn_sink() {
		let mut data = Vec::new();
		let sink: &mut dyn Write = &mut data;
		let_assert!(Ok(()) = write(sink, "{}{}", &[arg!(1.5), arg!(true)]));
		assert!(data == b"1.5true");
	}
}

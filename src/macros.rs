/// Create an [`Arg`][crate::Arg] with the best conversion strategy for the type of the value.
///
/// The strategy is chosen at compile time, in order of precedence:
/// [`Numeric`][crate::Numeric], [`Textual`][crate::Textual] and [`Display`][std::fmt::Display].
/// The value is borrowed, not moved.
///
/// In generic code, only the bounds declared on a type parameter are considered.
/// A `T: Display` argument always uses [`Display`][std::fmt::Display],
/// add a `T: Numeric` or `T: Textual` bound to select those strategies.
/// See the [`convert`][crate::convert] module for an example.
///
/// ```
/// use posfmt::{arg, Strategy};
///
/// let name = String::from("Ada");
/// assert_eq!(arg!(name).strategy(), Strategy::Text);
/// assert_eq!(arg!(36).strategy(), Strategy::Numeric);
/// assert_eq!(arg!(std::net::Ipv4Addr::LOCALHOST).strategy(), Strategy::Display);
/// ```
///
/// Types that can not be converted to text are rejected:
///
/// ```compile_fail
/// struct Opaque;
/// let _ = posfmt::arg!(Opaque);
/// ```
#[macro_export]
macro_rules! arg {
	($value:expr) => {{
		#[allow(unused_imports)]
		use $crate::convert::select::{ViaDisplay as _, ViaNumeric as _, ViaText as _};
		(&&$crate::convert::select::Select(&$value)).posfmt_select()
	}};
}

/// Format a template with the given arguments.
///
/// The template must be a constant expression.
/// It is checked at compile time against the number of arguments,
/// so a malformed template or a wrong number of arguments fails the build.
/// It is analyzed only once at runtime, the first time the call site is executed.
///
/// Each argument is converted as with [`arg!`][crate::arg],
/// including its limits in generic code.
/// The result is a `Result<String, posfmt::Error>`,
/// which can only fail if an argument fails to convert through [`Display`][std::fmt::Display].
///
/// ```
/// # fn main() -> Result<(), posfmt::Error> {
/// assert_eq!(posfmt::tformat!("Hello, {}! You are {} years old.", "Ada", 36)?, "Hello, Ada! You are 36 years old.");
/// assert_eq!(posfmt::tformat!("{1} before {0}", "b", "a")?, "a before b");
/// # Ok(())
/// # }
/// ```
///
/// ```compile_fail
/// // Index 1 is never used.
/// let _ = posfmt::tformat!("{0} and {2}", "x", "y");
/// ```
///
/// ```compile_fail
/// // Two placeholders, one argument.
/// let _ = posfmt::tformat!("{} and {}", "x");
/// ```
#[macro_export]
macro_rules! tformat {
	($template:expr $(, $arg:expr)* $(,)?) => {{
		const _: () = $crate::compiletime::assert_valid($template, $crate::__count_args!($($arg),*));

		#[allow(unused_imports)]
		use $crate::convert::select::{ViaDisplay as _, ViaNumeric as _, ViaText as _};

		static __POSFMT_ANALYZED: ::std::sync::OnceLock<
			::core::result::Result<$crate::Template<'static>, $crate::error::ParseError>,
		> = ::std::sync::OnceLock::new();

		match __POSFMT_ANALYZED.get_or_init(|| $crate::Template::from_str($template)) {
			::core::result::Result::Ok(template) => template
				.render(&[$((&&$crate::convert::select::Select(&$arg)).posfmt_select()),*])
				.map_err($crate::Error::from),
			::core::result::Result::Err(e) => ::core::result::Result::Err($crate::Error::from(e.clone())),
		}
	}};
}

/// Format a template and write it to an [`std::io::Write`] sink.
///
/// The sink is given as a mutable reference.
/// The output is rendered completely before a single write to the sink.
///
/// ```
/// # fn main() -> Result<(), posfmt::PrintError> {
/// let mut output = Vec::new();
/// posfmt::twrite!(&mut output, "{} + {} = {}", 1, 2, 3)?;
/// assert_eq!(output, b"1 + 2 = 3");
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! twrite {
	($sink:expr, $template:expr $(, $arg:expr)* $(,)?) => {
		$crate::output::emit($sink, $crate::tformat!($template $(, $arg)*), false)
	};
}

/// Format a template and write it to an [`std::io::Write`] sink, followed by a newline.
///
/// See [`twrite!`][crate::twrite].
#[macro_export]
macro_rules! twriteln {
	($sink:expr, $template:expr $(, $arg:expr)* $(,)?) => {
		$crate::output::emit($sink, $crate::tformat!($template $(, $arg)*), true)
	};
}

/// Format a template and write it to standard output.
///
/// Unlike [`std::print!`], this does not panic: it returns a `Result<(), posfmt::PrintError>`.
/// Standard output is only locked after formatting is done.
#[macro_export]
macro_rules! tprint {
	($template:expr $(, $arg:expr)* $(,)?) => {
		$crate::output::emit_stdout($crate::tformat!($template $(, $arg)*), false)
	};
}

/// Format a template and write it to standard output, followed by a newline.
///
/// See [`tprint!`][crate::tprint].
#[macro_export]
macro_rules! tprintln {
	($template:expr $(, $arg:expr)* $(,)?) => {
		$crate::output::emit_stdout($crate::tformat!($template $(, $arg)*), true)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __count_args {
	() => { 0usize };
	($head:expr $(, $tail:expr)*) => { 1usize + $crate::__count_args!($($tail),*) };
}

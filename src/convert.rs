//! Conversion of arguments to text.
//!
//! Every argument is converted with one of three strategies,
//! chosen by what the type of the argument can do, in this order:
//!
//! 1. [`Numeric`]: integers and floating point numbers, written in decimal.
//! 2. [`Textual`]: string-like values, copied verbatim.
//! 3. [`Display`][std::fmt::Display]: anything else that can be displayed.
//!
//! The [`arg!`][crate::arg] macro picks the first strategy the type supports.
//! The choice is made by the compiler for each type, not for each value.
//! A type that supports none of them is rejected at compile time.
//!
//! Inside generic code, the compiler only knows the bounds declared on the type parameter.
//! With `T: Display`, an argument of type `T` is always converted with [`Display`][std::fmt::Display],
//! even if the concrete type also implements [`Numeric`] or [`Textual`].
//! Add a `T: Numeric` or `T: Textual` bound to get those strategies in generic code.
//!
//! ```
//! use posfmt::{arg, Numeric, Strategy};
//! use std::fmt::Display;
//!
//! fn displayed<T: Display>(value: &T) -> Strategy {
//! 	arg!(value).strategy()
//! }
//!
//! fn numeric<T: Numeric + Display>(value: &T) -> Strategy {
//! 	arg!(value).strategy()
//! }
//!
//! assert_eq!(displayed(&36), Strategy::Display);
//! assert_eq!(numeric(&36), Strategy::Numeric);
//! ```
//!
//! ```
//! use posfmt::{arg, Strategy};
//!
//! assert_eq!(arg!(36).strategy(), Strategy::Numeric);
//! assert_eq!(arg!("Ada").strategy(), Strategy::Text);
//! assert_eq!(arg!(true).strategy(), Strategy::Display);
//! ```
//!
//! Only the [`Display`][std::fmt::Display] strategy can fail:
//! the other two write directly into the output buffer.

use std::borrow::Cow;
use std::fmt;
use std::num::{
	NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize,
	NonZeroU128, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can be written as a number.
///
/// Implemented for all primitive integers and floating point numbers, and their `NonZero` counterparts.
/// You can implement it for your own number-like types.
/// It takes precedence over [`Textual`] and [`Display`][fmt::Display].
pub trait Numeric {
	/// Append the decimal representation of the number to the output.
	fn write_numeric(&self, output: &mut String);
}

/// Types that already are text.
///
/// It takes precedence over [`Display`][fmt::Display], but not over [`Numeric`].
pub trait Textual {
	/// Append the text to the output.
	fn write_text(&self, output: &mut String);
}

/// The conversion strategy used for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
	/// The argument is converted with [`Numeric`].
	Numeric,

	/// The argument is converted with [`Textual`].
	Text,

	/// The argument is converted with [`Display`][fmt::Display].
	Display,
}

/// An argument for a template, together with its conversion strategy.
///
/// Normally created with the [`arg!`][crate::arg] macro, which selects the strategy automatically.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
	/// Convert the value with [`Numeric`].
	Numeric(&'a dyn Numeric),

	/// Convert the value with [`Textual`].
	Text(&'a dyn Textual),

	/// Convert the value with [`Display`][fmt::Display].
	Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
	/// Create an argument that is converted with [`Numeric`].
	#[inline]
	pub fn numeric<T: Numeric>(value: &'a T) -> Self {
		Self::Numeric(value)
	}

	/// Create an argument that is converted with [`Textual`].
	#[inline]
	pub fn text<T: Textual>(value: &'a T) -> Self {
		Self::Text(value)
	}

	/// Create an argument that is converted with [`Display`][fmt::Display].
	#[inline]
	pub fn display<T: fmt::Display>(value: &'a T) -> Self {
		Self::Display(value)
	}

	/// Get the conversion strategy of the argument.
	#[inline]
	pub fn strategy(&self) -> Strategy {
		match self {
			Self::Numeric(_) => Strategy::Numeric,
			Self::Text(_) => Strategy::Text,
			Self::Display(_) => Strategy::Display,
		}
	}

	/// Append the text of the argument to the output.
	///
	/// On error, the output may contain partial text of the argument.
	pub fn write_to(&self, output: &mut String) -> fmt::Result {
		match self {
			Self::Numeric(value) => {
				value.write_numeric(output);
				Ok(())
			},
			Self::Text(value) => {
				value.write_text(output);
				Ok(())
			},
			Self::Display(value) => {
				use fmt::Write;
				write!(output, "{}", value)
			},
		}
	}

	/// Convert the argument to text.
	pub fn convert(&self) -> Result<String, fmt::Error> {
		let mut output = String::new();
		self.write_to(&mut output)?;
		Ok(output)
	}
}

impl fmt::Debug for Arg<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Arg").field(&self.strategy()).finish()
	}
}

macro_rules! impl_numeric_integer {
	($($ty:ty),*) => {
		$(
			impl Numeric for $ty {
				#[inline]
				fn write_numeric(&self, output: &mut String) {
					output.push_str(itoa::Buffer::new().format(*self));
				}
			}
		)*
	};
}

macro_rules! impl_numeric_float {
	($($ty:ty),*) => {
		$(
			impl Numeric for $ty {
				#[inline]
				fn write_numeric(&self, output: &mut String) {
					output.push_str(ryu::Buffer::new().format(*self));
				}
			}
		)*
	};
}

macro_rules! impl_numeric_non_zero {
	($($ty:ty),*) => {
		$(
			impl Numeric for $ty {
				#[inline]
				fn write_numeric(&self, output: &mut String) {
					self.get().write_numeric(output);
				}
			}
		)*
	};
}

impl_numeric_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric_float!(f32, f64);

impl_numeric_non_zero!(
	NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize,
	NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize
);

impl<T: Numeric + ?Sized> Numeric for &T {
	#[inline]
	fn write_numeric(&self, output: &mut String) {
		T::write_numeric(self, output)
	}
}

impl Textual for str {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl Textual for char {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push(*self)
	}
}

impl Textual for String {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl Textual for Cow<'_, str> {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl Textual for Box<str> {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl Textual for Rc<str> {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl Textual for Arc<str> {
	#[inline]
	fn write_text(&self, output: &mut String) {
		output.push_str(self)
	}
}

impl<T: Textual + ?Sized> Textual for &T {
	#[inline]
	fn write_text(&self, output: &mut String) {
		T::write_text(self, output)
	}
}

/// Strategy selection for the [`arg!`][crate::arg] macro.
///
/// This uses method resolution on auto-referenced receivers:
/// the compiler tries `&&Select<T>` (numeric) first, then `&Select<T>` (text),
/// and finally `Select<T>` (display), and picks the first one whose trait bound holds.
#[doc(hidden)]
pub mod select {
	use super::{Arg, Numeric, Textual};
	use std::fmt;

	/// Wrapper around an argument reference used to select a conversion strategy.
	pub struct Select<'a, T>(pub &'a T);

	impl<T> Clone for Select<'_, T> {
		#[inline]
		fn clone(&self) -> Self {
			*self
		}
	}

	impl<T> Copy for Select<'_, T> {}

	impl<T> fmt::Debug for Select<'_, T> {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.debug_struct("Select").finish_non_exhaustive()
		}
	}

	pub trait ViaNumeric<'a> {
		fn posfmt_select(self) -> Arg<'a>;
	}

	impl<'a, T: Numeric> ViaNumeric<'a> for &&Select<'a, T> {
		#[inline]
		fn posfmt_select(self) -> Arg<'a> {
			Arg::Numeric(self.0)
		}
	}

	pub trait ViaText<'a> {
		fn posfmt_select(self) -> Arg<'a>;
	}

	impl<'a, T: Textual> ViaText<'a> for &Select<'a, T> {
		#[inline]
		fn posfmt_select(self) -> Arg<'a> {
			Arg::Text(self.0)
		}
	}

	pub trait ViaDisplay<'a> {
		fn posfmt_select(self) -> Arg<'a>;
	}

	impl<'a, T: fmt::Display> ViaDisplay<'a> for Select<'a, T> {
		#[inline]
		fn posfmt_select(self) -> Arg<'a> {
			Arg::Display(self.0)
		}
	}
}

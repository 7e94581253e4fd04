//! Checking templates at compile time.
//!
//! All functions in this module are `const fn`, so they can be evaluated in a const context.
//! They follow the exact same rules as [`Template::from_str()`][crate::Template::from_str],
//! but only report what is wrong and where instead of a full [`ParseError`][crate::error::ParseError].
//!
//! ```
//! use posfmt::compiletime::{required_arguments, Violation};
//!
//! const GREETING: usize = match required_arguments("Hello, {}! You are {} years old.") {
//! 	Ok(count) => count,
//! 	Err(_) => panic!("bad template"),
//! };
//! assert_eq!(GREETING, 2);
//! assert_eq!(required_arguments("{0} and {2}"), Err(Violation::GapInIndices { missing: 1 }));
//! ```
//!
//! Used in a const item, [`assert_valid()`] turns a bad template into a build failure.
//! This is what [`tformat!`][crate::tformat] does for every call site.
//!
//! ```compile_fail
//! const _: () = posfmt::compiletime::assert_valid("{} and {1}", 2);
//! ```

use crate::template::{parse_marker, IndexingMode};

/// A rule violated by a template, as found by [`check()`] or [`required_arguments()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
	/// A placeholder is malformed: not terminated, or something other than digits between the braces.
	Syntax {
		/// The byte offset of the opening brace of the malformed placeholder.
		position: usize,
	},

	/// A template uses both `{}` and `{N}` placeholders.
	MixedIndexingMode {
		/// The byte offset of the first placeholder that conflicts with the first placeholder.
		position: usize,
	},

	/// An argument index between zero and the largest index is never used.
	GapInIndices {
		/// The smallest unused index.
		missing: usize,
	},

	/// The number of arguments does not match the template.
	ArgumentCountMismatch {
		/// The number of arguments required by the template.
		expected: usize,

		/// The number of arguments given.
		actual: usize,
	},
}

impl std::fmt::Display for Violation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Syntax { position } => write!(f, "Malformed placeholder at byte {position}"),
			Self::MixedIndexingMode { position } => write!(f, "Mixed placeholder indexing at byte {position}"),
			Self::GapInIndices { missing } => write!(f, "No placeholder for argument {missing}"),
			Self::ArgumentCountMismatch { expected, actual } => {
				write!(f, "Wrong number of arguments: template expects {expected}, got {actual}")
			},
		}
	}
}

impl std::error::Error for Violation {}

/// Get the number of arguments a template must be rendered with.
pub const fn required_arguments(template: &str) -> Result<usize, Violation> {
	let source = template.as_bytes();
	if let Err(e) = check_syntax(source) {
		return Err(e);
	}

	let mut mode: Option<IndexingMode> = None;
	let mut placeholders = 0;
	let mut distinct = 0;
	let mut max = 0;

	let mut finger = 0;
	while finger < source.len() {
		if source[finger] != b'{' {
			finger += 1;
			continue;
		}

		let marker = match parse_marker(source, finger) {
			Ok(marker) => marker,
			Err(_) => return Err(Violation::Syntax { position: finger }),
		};
		let explicit = marker.index.is_some();
		match mode {
			None if explicit => mode = Some(IndexingMode::Explicit),
			None => mode = Some(IndexingMode::Implicit),
			Some(IndexingMode::Implicit) if explicit => return Err(Violation::MixedIndexingMode { position: finger }),
			Some(IndexingMode::Explicit) if !explicit => return Err(Violation::MixedIndexingMode { position: finger }),
			Some(_) => (),
		}

		placeholders += 1;
		if let Some(index) = marker.index {
			if !uses_index(source, finger, index) {
				distinct += 1;
			}
			if index > max {
				max = index;
			}
		}
		finger = marker.end;
	}

	match mode {
		None => Ok(0),
		Some(IndexingMode::Implicit) => Ok(placeholders),
		// `distinct` is at least one here, and can only exceed `max` by one.
		Some(IndexingMode::Explicit) if distinct - 1 == max => Ok(distinct),
		Some(IndexingMode::Explicit) => Err(Violation::GapInIndices {
			missing: first_unused_index(source),
		}),
	}
}

/// Check that a template is valid and needs exactly `argument_count` arguments.
pub const fn check(template: &str, argument_count: usize) -> Result<(), Violation> {
	match required_arguments(template) {
		Ok(expected) if expected == argument_count => Ok(()),
		Ok(expected) => Err(Violation::ArgumentCountMismatch {
			expected,
			actual: argument_count,
		}),
		Err(e) => Err(e),
	}
}

/// Panic if a template is invalid or does not need exactly `argument_count` arguments.
///
/// In a const context, the panic becomes a compile error.
#[track_caller]
pub const fn assert_valid(template: &str, argument_count: usize) {
	match check(template, argument_count) {
		Ok(()) => (),
		Err(Violation::Syntax { .. }) => panic!("malformed placeholder in template, expected a closing brace or digits followed by a closing brace"),
		Err(Violation::MixedIndexingMode { .. }) => panic!("template mixes implicit and explicit placeholder indices"),
		Err(Violation::GapInIndices { .. }) => panic!("template does not use every argument index from zero to the largest one"),
		Err(Violation::ArgumentCountMismatch { .. }) => panic!("wrong number of arguments for template"),
	}
}

/// Check that every placeholder in the source is well formed.
const fn check_syntax(source: &[u8]) -> Result<(), Violation> {
	let mut finger = 0;
	while finger < source.len() {
		if source[finger] != b'{' {
			finger += 1;
			continue;
		}
		match parse_marker(source, finger) {
			Ok(marker) => finger = marker.end,
			Err(_) => return Err(Violation::Syntax { position: finger }),
		}
	}
	Ok(())
}

/// Check if a placeholder before `end` uses the given index.
///
/// The source up to `end` must already be known to contain only valid placeholders.
const fn uses_index(source: &[u8], end: usize, index: usize) -> bool {
	let mut finger = 0;
	while finger < end {
		if source[finger] != b'{' {
			finger += 1;
			continue;
		}
		match parse_marker(source, finger) {
			Ok(marker) => {
				if let Some(other) = marker.index {
					if other == index {
						return true;
					}
				}
				finger = marker.end;
			},
			Err(_) => return false,
		}
	}
	false
}

/// Find the smallest index that is not used by any placeholder.
const fn first_unused_index(source: &[u8]) -> usize {
	let mut candidate = 0;
	while uses_index(source, source.len(), candidate) {
		candidate += 1;
	}
	candidate
}

use super::scan::ScannedMarker;
use super::{IndexingMode, Placeholder};
use crate::error::{self, ParseError};

/// Placeholders with their final argument index.
pub struct Resolved {
	/// The placeholders in source order.
	pub placeholders: Vec<Placeholder>,

	/// The indexing mode, or `None` if there are no placeholders.
	pub mode: Option<IndexingMode>,

	/// The number of arguments needed to render the template.
	pub argument_count: usize,
}

/// Resolve the argument index of every marker and validate the index coverage.
///
/// The indexing mode is decided by the first marker.
/// Implicit markers take the arguments in order,
/// explicit markers may repeat an index or use them out of order,
/// but must use every index from zero to the largest one.
pub fn resolve(markers: Vec<ScannedMarker>) -> Result<Resolved, ParseError> {
	let mode = match markers.first() {
		None => {
			return Ok(Resolved {
				placeholders: Vec::new(),
				mode: None,
				argument_count: 0,
			})
		},
		Some(first) => mode_of(first),
	};

	if let Some(conflict) = markers.iter().find(|marker| mode_of(marker) != mode) {
		return Err(error::MixedIndexingMode {
			position: conflict.range.start,
			len: conflict.range.len(),
			mode,
		}
		.into());
	}

	let placeholders: Vec<_> = markers
		.into_iter()
		.enumerate()
		.map(|(ordinal, marker)| Placeholder {
			index: marker.explicit.unwrap_or(ordinal),
			range: marker.range,
			explicit: marker.explicit,
		})
		.collect();

	let argument_count = match mode {
		IndexingMode::Implicit => placeholders.len(),
		IndexingMode::Explicit => check_coverage(&placeholders)?,
	};

	Ok(Resolved {
		placeholders,
		mode: Some(mode),
		argument_count,
	})
}

fn mode_of(marker: &ScannedMarker) -> IndexingMode {
	match marker.explicit {
		Some(_) => IndexingMode::Explicit,
		None => IndexingMode::Implicit,
	}
}

/// Check that the placeholders use every index from zero up to the largest one.
///
/// Returns the number of distinct indices.
fn check_coverage(placeholders: &[Placeholder]) -> Result<usize, ParseError> {
	let mut distinct: Vec<usize> = placeholders.iter().map(|placeholder| placeholder.index).collect();
	distinct.sort_unstable();
	distinct.dedup();

	// Sorted, de-duplicated and non-negative: index `i` is present if and only if `distinct[i] == i`.
	let missing = distinct
		.iter()
		.enumerate()
		.find(|&(position, &index)| position != index)
		.map(|(position, _)| position);

	match (missing, distinct.last()) {
		(Some(missing), Some(&max)) => Err(error::GapInIndices { missing, max }.into()),
		_ => Ok(distinct.len()),
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::template::raw::scan::scan;
	use assert2::{assert, check, let_assert};

	fn resolve_str(source: &str) -> Result<Resolved, ParseError> {
		let scanned = match scan(source) {
			Ok(x) => x,
			Err(e) => panic!("failed to scan {source:?}: {e}"),
		};
		resolve(scanned.markers)
	}

	fn indices(resolved: &Resolved) -> Vec<usize> {
		resolved.placeholders.iter().map(|placeholder| placeholder.index).collect()
	}

	#[test]
	fn no_placeholders() {
		let_assert!(Ok(resolved) = resolve_str("no placeholders here"));
		check!(resolved.mode == None);
		check!(resolved.argument_count == 0);
		check!(resolved.placeholders.is_empty());
	}

	#[test]
	fn implicit_indices_follow_marker_order() {
		let_assert!(Ok(resolved) = resolve_str("{} {} {}"));
		check!(resolved.mode == Some(IndexingMode::Implicit));
		check!(resolved.argument_count == 3);
		check!(indices(&resolved) == [0, 1, 2]);
	}

	#[test]
	fn explicit_indices_are_taken_verbatim() {
		let_assert!(Ok(resolved) = resolve_str("{1} before {0}"));
		check!(resolved.mode == Some(IndexingMode::Explicit));
		check!(resolved.argument_count == 2);
		check!(indices(&resolved) == [1, 0]);

		let_assert!(Ok(resolved) = resolve_str("{0} and {0}"));
		check!(resolved.argument_count == 1);
		check!(indices(&resolved) == [0, 0]);

		let_assert!(Ok(resolved) = resolve_str("{2}{0}{1}{2}{0}"));
		check!(resolved.argument_count == 3);
		check!(indices(&resolved) == [2, 0, 1, 2, 0]);
	}

	#[test]
	fn mixed_indexing_mode() {
		let source = "{} and {1}";
		let_assert!(Err(ParseError::MixedIndexingMode(e)) = resolve_str(source));
		check!(e.position == 7);
		check!(e.len == 3);
		check!(e.mode == IndexingMode::Implicit);

		let source = "{0} and {}";
		let_assert!(Err(e) = resolve_str(source));
		assert!(e.to_string() == "Mixed placeholder indexing: found '{}' in a template that uses '{N}'");
		assert!(e.source_highlighting(source) == concat!(
			"  {0} and {}\n",
			"          ^^\n",
		));
	}

	#[test]
	fn gap_in_indices() {
		let_assert!(Err(ParseError::GapInIndices(e)) = resolve_str("{0} and {2}"));
		check!(e.missing == 1);
		check!(e.max == 2);

		let_assert!(Err(ParseError::GapInIndices(e)) = resolve_str("{1}"));
		check!(e.missing == 0);
		check!(e.max == 1);

		let_assert!(Err(ParseError::GapInIndices(e)) = resolve_str("{3}{3}{0}{1}{5}"));
		check!(e.missing == 2);
		check!(e.max == 5);
	}

	#[test]
	fn huge_index_does_not_allocate_a_table() {
		let source = format!("{{0}}{{{}}}", usize::MAX);
		let_assert!(Err(ParseError::GapInIndices(e)) = resolve_str(&source));
		check!(e.missing == 1);
		check!(e.max == usize::MAX);
	}
}

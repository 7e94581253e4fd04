//! Sharing analyzed templates between threads.
//!
//! A [`TemplateCache`] maps template sources to their analyzed form,
//! so that a template used in many places or by many threads is only analyzed once.
//!
//! ```
//! # fn main() -> Result<(), posfmt::Error> {
//! use posfmt::arg;
//!
//! let cache = posfmt::TemplateCache::new();
//! let template = cache.get_or_parse("{} + {} = {}")?;
//! assert_eq!(template.render(&[arg!(1), arg!(2), arg!(3)])?, "1 + 2 = 3");
//! assert!(cache.contains("{} + {} = {}"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::error::ParseError;
use crate::TemplateBuf;

/// A thread safe cache of analyzed templates, keyed by their source.
///
/// Entries are immutable once inserted and are never evicted.
/// A template that fails to analyze is not cached.
#[derive(Debug, Default)]
pub struct TemplateCache {
	entries: RwLock<HashMap<Box<str>, Arc<TemplateBuf>>>,
}

impl TemplateCache {
	/// Create a new empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the analyzed template for a source, analyzing it if it is not cached yet.
	///
	/// If two threads miss at the same time, both analyze the template,
	/// but only the first one to finish is stored and returned to both.
	pub fn get_or_parse(&self, source: &str) -> Result<Arc<TemplateBuf>, ParseError> {
		if let Some(template) = self.get(source) {
			tracing::trace!(source, "template cache hit");
			return Ok(template);
		}

		tracing::debug!(source, "template cache miss");
		let analyzed = Arc::new(TemplateBuf::from_string(source.into())?);

		let mut entries = self.entries.write();
		let template = entries.entry(source.into()).or_insert_with(|| analyzed.clone());
		if !Arc::ptr_eq(template, &analyzed) {
			tracing::debug!(source, "template was inserted by another thread, discarding duplicate");
		}
		Ok(template.clone())
	}

	/// Get the analyzed template for a source, if it is cached.
	pub fn get(&self, source: &str) -> Option<Arc<TemplateBuf>> {
		let entries = self.entries.read();
		entries.get(source).cloned()
	}

	/// Check if a source is cached.
	pub fn contains(&self, source: &str) -> bool {
		let entries = self.entries.read();
		entries.contains_key(source)
	}

	/// Get the number of cached templates.
	pub fn len(&self) -> usize {
		let entries = self.entries.read();
		entries.len()
	}

	/// Check if the cache is empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

static GLOBAL: LazyLock<TemplateCache> = LazyLock::new(TemplateCache::new);

/// Get the process wide template cache.
pub fn global() -> &'static TemplateCache {
	&GLOBAL
}

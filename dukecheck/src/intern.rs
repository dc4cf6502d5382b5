//! Sharing of the text read from constant pools.
//!
//! Interning only saves memory, it never changes what a parse produces.

use std::sync::Arc;
use fnv::FnvHashSet;
use parking_lot::RwLock;

/// A cache handing out one shared allocation per distinct string.
pub trait Interner: Send + Sync {
	fn intern(&self, string: &str) -> Arc<str>;
}

/// An [`Interner`] that can be shared between threads parsing different class files.
#[derive(Debug, Default)]
pub struct SharedInterner {
	strings: RwLock<FnvHashSet<Arc<str>>>,
}

impl SharedInterner {
	pub fn new() -> SharedInterner {
		SharedInterner::default()
	}

	pub fn len(&self) -> usize {
		self.strings.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.strings.read().is_empty()
	}
}

impl Interner for SharedInterner {
	fn intern(&self, string: &str) -> Arc<str> {
		if let Some(existing) = self.strings.read().get(string) {
			return existing.clone();
		}

		let mut strings = self.strings.write();
		// someone else might have inserted it between the two locks
		if let Some(existing) = strings.get(string) {
			return existing.clone();
		}
		let new: Arc<str> = Arc::from(string);
		strings.insert(new.clone());
		new
	}
}

/// An [`Interner`] that allocates every string on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterning;

impl Interner for NoInterning {
	fn intern(&self, string: &str) -> Arc<str> {
		Arc::from(string)
	}
}

//! Thread-safe in-memory [`StorageBackend`] for hosts without durable storage and for tests.

// self
use crate::{
	_prelude::*,
	store::{StorageBackend, StoreError},
};

/// In-process storage backend with an optional byte quota.
///
/// The quota models the `QuotaExceededError` surface of browser storage: a write that would push
/// the total payload size past the limit fails, letting callers exercise the TTL store's
/// degrade-to-no-op behavior.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
	inner: Arc<RwLock<HashMap<String, String>>>,
	quota: Option<usize>,
}
impl MemoryBackend {
	/// Creates an unbounded in-memory backend.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a backend that rejects writes once total key + payload bytes exceed `bytes`.
	pub fn with_quota(bytes: usize) -> Self {
		Self { inner: Default::default(), quota: Some(bytes) }
	}

	fn used_bytes(map: &HashMap<String, String>) -> usize {
		map.iter().map(|(k, v)| k.len() + v.len()).sum()
	}
}
impl StorageBackend for MemoryBackend {
	fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.inner.read().get(key).cloned())
	}

	fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let mut guard = self.inner.write();

		if let Some(quota) = self.quota {
			let replaced = guard.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
			let projected =
				Self::used_bytes(&guard) - replaced + key.len() + value.len();

			if projected > quota {
				return Err(StoreError::Backend {
					message: format!("Storage quota exceeded writing `{key}`"),
				});
			}
		}

		guard.insert(key.to_owned(), value.to_owned());

		Ok(())
	}

	fn delete(&self, key: &str) -> Result<(), StoreError> {
		self.inner.write().remove(key);

		Ok(())
	}

	fn keys(&self) -> Result<Vec<String>, StoreError> {
		Ok(self.inner.read().keys().cloned().collect())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn write_read_delete_round_trip() {
		let backend = MemoryBackend::new();

		backend.write("k", "v").expect("Write should succeed.");

		assert_eq!(backend.read("k").expect("Read should succeed."), Some("v".to_owned()));

		backend.delete("k").expect("Delete should succeed.");

		assert_eq!(backend.read("k").expect("Read should succeed."), None);
	}

	#[test]
	fn quota_rejects_oversized_writes() {
		let backend = MemoryBackend::with_quota(4);

		assert!(backend.write("k", "vvvvvvvv").is_err());
		assert!(backend.write("k", "v").is_ok());
		// Replacing an entry frees its previous bytes first.
		assert!(backend.write("k", "vv").is_ok());
	}
}

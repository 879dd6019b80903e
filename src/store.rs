//! Namespaced TTL key-value store and the raw storage backends it writes through.
//!
//! The store mirrors the persistence contract of a hosted login page: values are serialized as
//! `{ value, expires_at? }` JSON records under a fixed key prefix, expired records are swept
//! eagerly at construction and evicted lazily on read, and every backend failure (quota,
//! serialization) is logged and swallowed so the page never crashes over storage.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

// self
use crate::_prelude::*;

/// Well-known keys persisted by the wizard pages.
pub mod key {
	/// Document type + number remembered across logins (30-day TTL).
	pub const SAVED_DOCUMENT: &str = "saved_document";
	/// MFA method chosen on the selection step (10-minute TTL).
	pub const MFA_METHOD: &str = "mfa_method";
}

/// Raw string key-value surface the TTL store writes through.
///
/// Models a browser `localStorage`-like area: flat string keys, string payloads, and fallible
/// writes (quota). Implementations must be shareable across the host and test harnesses.
pub trait StorageBackend
where
	Self: Send + Sync,
{
	/// Returns the raw payload stored under `key`, if any.
	fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Persists or replaces the raw payload under `key`.
	fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Deletes the payload under `key`; deleting an absent key is a no-op.
	fn delete(&self, key: &str) -> Result<(), StoreError>;

	/// Lists every key currently present in the backend.
	fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Error type produced by [`StorageBackend`] implementations and the TTL store internals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced while encoding or decoding a stored record.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure (quota exceeded, I/O).
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Stored record layout: the caller's value plus an optional absolute expiry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
	value: serde_json::Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	expires_at: Option<i64>,
}
impl StoredItem {
	fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|at| now.unix_timestamp() > at)
	}
}

/// Namespaced key-value store with per-entry TTL over an injected [`StorageBackend`].
///
/// Construction sweeps every expired namespaced entry; reads past an entry's expiry delete the
/// stale record and report it absent. Backend and serialization failures never propagate to the
/// caller; the store logs them (with the `tracing` feature) and degrades to a no-op.
#[derive(Clone)]
pub struct TtlStore {
	backend: Arc<dyn StorageBackend>,
	namespace: String,
}
impl TtlStore {
	/// Key prefix applied when no explicit namespace is supplied.
	pub const DEFAULT_NAMESPACE: &'static str = "auth_wizard_";

	/// Creates a store under [`Self::DEFAULT_NAMESPACE`], sweeping expired entries eagerly.
	pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
		Self::with_namespace(backend, Self::DEFAULT_NAMESPACE)
	}

	/// Creates a store under the provided namespace, sweeping expired entries eagerly.
	pub fn with_namespace(backend: Arc<dyn StorageBackend>, namespace: impl Into<String>) -> Self {
		let store = Self { backend, namespace: namespace.into() };

		store.sweep_expired_at(OffsetDateTime::now_utc());

		store
	}

	/// Persists a value without an expiry; it is retrievable until removed.
	pub fn set<T>(&self, key: &str, value: &T)
	where
		T: Serialize,
	{
		swallow("set", key, self.try_set(key, value, None, OffsetDateTime::now_utc()));
	}

	/// Persists a value that expires `ttl` after now.
	pub fn set_with_ttl<T>(&self, key: &str, value: &T, ttl: Duration)
	where
		T: Serialize,
	{
		self.set_with_ttl_at(key, value, ttl, OffsetDateTime::now_utc());
	}

	/// Persists a value that expires `ttl` after the provided instant.
	pub fn set_with_ttl_at<T>(&self, key: &str, value: &T, ttl: Duration, now: OffsetDateTime)
	where
		T: Serialize,
	{
		swallow("set", key, self.try_set(key, value, Some(ttl), now));
	}

	/// Fetches a value, evicting it first when its expiry has passed.
	pub fn get<T>(&self, key: &str) -> Option<T>
	where
		T: serde::de::DeserializeOwned,
	{
		self.get_at(key, OffsetDateTime::now_utc())
	}

	/// Fetches a value relative to the provided instant (lazy eviction included).
	pub fn get_at<T>(&self, key: &str, now: OffsetDateTime) -> Option<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let value = swallow("get", key, self.try_get_at(key, now))??;

		swallow("get", key, decode(key, value))
	}

	/// Removes the entry under `key`, expired or not.
	pub fn remove(&self, key: &str) {
		swallow("remove", key, self.backend.delete(&self.scoped(key)));
	}

	/// Returns `true` when an unexpired entry exists under `key`.
	pub fn has(&self, key: &str) -> bool {
		self.has_at(key, OffsetDateTime::now_utc())
	}

	/// Presence check relative to the provided instant.
	pub fn has_at(&self, key: &str, now: OffsetDateTime) -> bool {
		matches!(swallow("has", key, self.try_get_at(key, now)), Some(Some(_)))
	}

	/// Deletes every entry under this store's namespace.
	pub fn clear(&self) {
		swallow("clear", "*", self.try_clear());
	}

	/// Returns every unexpired entry under this store's namespace, keyed without the prefix.
	pub fn get_all(&self) -> BTreeMap<String, serde_json::Value> {
		self.get_all_at(OffsetDateTime::now_utc())
	}

	/// Snapshot of unexpired entries relative to the provided instant.
	pub fn get_all_at(&self, now: OffsetDateTime) -> BTreeMap<String, serde_json::Value> {
		let mut items = BTreeMap::new();

		for key in self.namespaced_keys() {
			if let Some(Some(value)) = swallow("get_all", &key, self.try_get_at(&key, now)) {
				items.insert(key, value);
			}
		}

		items
	}

	/// Deletes every namespaced entry whose expiry precedes the provided instant.
	pub fn sweep_expired_at(&self, now: OffsetDateTime) {
		for key in self.namespaced_keys() {
			swallow("sweep", &key, self.try_sweep_one(&key, now));
		}
	}

	fn scoped(&self, key: &str) -> String {
		format!("{}{key}", self.namespace)
	}

	fn namespaced_keys(&self) -> Vec<String> {
		swallow("keys", "*", self.backend.keys())
			.unwrap_or_default()
			.into_iter()
			.filter_map(|raw| raw.strip_prefix(&self.namespace).map(str::to_owned))
			.collect()
	}

	fn try_set<T>(
		&self,
		key: &str,
		value: &T,
		ttl: Option<Duration>,
		now: OffsetDateTime,
	) -> Result<(), StoreError>
	where
		T: Serialize,
	{
		let value = serde_json::to_value(value).map_err(|e| StoreError::Serialization {
			message: format!("Failed to encode `{key}`: {e}"),
		})?;
		let expires_at = ttl.map(|ttl| (now + ttl).unix_timestamp());
		let item = StoredItem { value, expires_at };
		let raw = serde_json::to_string(&item).map_err(|e| StoreError::Serialization {
			message: format!("Failed to encode record for `{key}`: {e}"),
		})?;

		self.backend.write(&self.scoped(key), &raw)
	}

	fn try_get_at(
		&self,
		key: &str,
		now: OffsetDateTime,
	) -> Result<Option<serde_json::Value>, StoreError> {
		let scoped = self.scoped(key);
		let Some(raw) = self.backend.read(&scoped)? else {
			return Ok(None);
		};
		let item = parse_item(key, &raw)?;

		if item.is_expired_at(now) {
			self.backend.delete(&scoped)?;

			return Ok(None);
		}

		Ok(Some(item.value))
	}

	fn try_sweep_one(&self, key: &str, now: OffsetDateTime) -> Result<(), StoreError> {
		let scoped = self.scoped(key);
		let Some(raw) = self.backend.read(&scoped)? else {
			return Ok(());
		};

		// Unparseable records are stale garbage; sweep them along with the expired ones.
		match parse_item(key, &raw) {
			Ok(item) if item.is_expired_at(now) => self.backend.delete(&scoped),
			Ok(_) => Ok(()),
			Err(_) => self.backend.delete(&scoped),
		}
	}

	fn try_clear(&self) -> Result<(), StoreError> {
		for key in self.backend.keys()? {
			if key.starts_with(&self.namespace) {
				self.backend.delete(&key)?;
			}
		}

		Ok(())
	}
}
impl Debug for TtlStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TtlStore").field("namespace", &self.namespace).finish()
	}
}

fn parse_item(key: &str, raw: &str) -> Result<StoredItem, StoreError> {
	let mut deserializer = serde_json::Deserializer::from_str(raw);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|e| StoreError::Serialization {
		message: format!("Failed to parse record for `{key}`: {e}"),
	})
}

fn decode<T>(key: &str, value: serde_json::Value) -> Result<T, StoreError>
where
	T: serde::de::DeserializeOwned,
{
	serde_json::from_value(value)
		.map_err(|e| StoreError::Serialization { message: format!("Failed to decode `{key}`: {e}") })
}

fn swallow<T>(op: &'static str, key: &str, result: Result<T, StoreError>) -> Option<T> {
	match result {
		Ok(value) => Some(value),
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::warn!(
				target: "auth_wizard.store",
				op,
				key,
				error = %e,
				"Storage operation failed; degrading to a no-op.",
			);
			#[cfg(not(feature = "tracing"))]
			let _ = (op, key, e);

			None
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn build_store() -> (TtlStore, Arc<MemoryBackend>) {
		let backend = Arc::new(MemoryBackend::new());
		let store = TtlStore::new(backend.clone());

		(store, backend)
	}

	#[test]
	fn set_without_ttl_never_expires() {
		let (store, _) = build_store();

		store.set(key::SAVED_DOCUMENT, &"persistent".to_owned());

		let far_future = macros::datetime!(2099-01-01 00:00 UTC);

		assert_eq!(
			store.get_at::<String>(key::SAVED_DOCUMENT, far_future),
			Some("persistent".to_owned()),
		);
	}

	#[test]
	fn get_past_expiry_returns_absent_and_evicts() {
		let (store, backend) = build_store();
		let written = macros::datetime!(2025-06-01 12:00 UTC);

		store.set_with_ttl_at("mfa_method", &"email".to_owned(), Duration::minutes(10), written);

		let after_expiry = written + Duration::minutes(11);

		assert_eq!(store.get_at::<String>("mfa_method", after_expiry), None);
		assert_eq!(
			backend.read("auth_wizard_mfa_method").expect("Backend read should succeed."),
			None,
			"Expired entry must be deleted by the failed read.",
		);
		// A second read stays absent without erroring.
		assert_eq!(store.get_at::<String>("mfa_method", after_expiry), None);
	}

	#[test]
	fn get_before_expiry_returns_value() {
		let (store, _) = build_store();
		let written = macros::datetime!(2025-06-01 12:00 UTC);

		store.set_with_ttl_at("mfa_method", &"sms".to_owned(), Duration::minutes(10), written);

		assert_eq!(
			store.get_at::<String>("mfa_method", written + Duration::minutes(9)),
			Some("sms".to_owned()),
		);
	}

	#[test]
	fn construction_sweeps_expired_namespaced_entries() {
		let backend = Arc::new(MemoryBackend::new());

		backend
			.write("auth_wizard_stale", "{\"value\":1,\"expires_at\":0}")
			.expect("Seeding stale entry should succeed.");
		backend
			.write("auth_wizard_fresh", "{\"value\":2}")
			.expect("Seeding fresh entry should succeed.");
		backend
			.write("unrelated_key", "{\"value\":3,\"expires_at\":0}")
			.expect("Seeding foreign entry should succeed.");

		let store = TtlStore::new(backend.clone());

		assert_eq!(
			backend.read("auth_wizard_stale").expect("Backend read should succeed."),
			None,
			"Construction must sweep expired entries under the namespace.",
		);
		assert_eq!(store.get::<u8>("fresh"), Some(2));
		assert!(
			backend.read("unrelated_key").expect("Backend read should succeed.").is_some(),
			"Entries outside the namespace must be left untouched.",
		);
	}

	#[test]
	fn quota_failure_degrades_to_noop() {
		let backend = Arc::new(MemoryBackend::with_quota(8));
		let store = TtlStore::new(backend);

		// Far larger than the quota; the write is dropped instead of panicking.
		store.set("big", &"x".repeat(64));

		assert_eq!(store.get::<String>("big"), None);
	}

	#[test]
	fn malformed_record_reads_as_absent() {
		let (store, backend) = build_store();

		backend
			.write("auth_wizard_broken", "not json at all")
			.expect("Seeding malformed entry should succeed.");

		assert_eq!(store.get::<String>("broken"), None);
	}

	#[test]
	fn clear_removes_only_namespaced_entries() {
		let (store, backend) = build_store();

		store.set("one", &1_u8);
		store.set("two", &2_u8);
		backend.write("foreign", "{}").expect("Seeding foreign entry should succeed.");

		store.clear();

		assert!(store.get_all().is_empty());
		assert!(backend.read("foreign").expect("Backend read should succeed.").is_some());
	}

	#[test]
	fn get_all_skips_expired_entries() {
		let (store, _) = build_store();
		let written = macros::datetime!(2025-06-01 12:00 UTC);

		store.set("keep", &"kept".to_owned());
		store.set_with_ttl_at("drop", &"dropped".to_owned(), Duration::minutes(1), written);

		let items = store.get_all_at(written + Duration::minutes(2));

		assert_eq!(items.len(), 1);
		assert_eq!(items.get("keep"), Some(&serde_json::Value::String("kept".into())));
	}
}

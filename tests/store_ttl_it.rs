// std
use std::sync::Arc;
// crates.io
use time::{Duration, macros};
// self
use auth_wizard::{
	store::{FileBackend, MemoryBackend, StorageBackend, TtlStore, key},
	widget::Document,
};

fn temp_snapshot_path(tag: &str) -> std::path::PathBuf {
	let nanos = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.expect("System clock should be past the epoch.")
		.subsec_nanos();

	std::env::temp_dir().join(format!("auth_wizard_{tag}_{}_{nanos}.json", std::process::id()))
}

#[test]
fn saved_document_survives_within_its_window_and_expires_after() {
	let store = TtlStore::new(Arc::new(MemoryBackend::new()));
	let written = macros::datetime!(2025-06-01 12:00 UTC);
	let document: Document =
		serde_json::from_str(r#"{"type":"DNI","number":"12345678"}"#)
			.expect("Document fixture should parse.");

	store.set_with_ttl_at(key::SAVED_DOCUMENT, &document, Duration::days(30), written);

	assert_eq!(
		store.get_at::<Document>(key::SAVED_DOCUMENT, written + Duration::days(29)),
		Some(document),
	);
	assert_eq!(
		store.get_at::<Document>(key::SAVED_DOCUMENT, written + Duration::days(31)),
		None,
	);
	// The expired record is gone for good, even for an earlier clock.
	assert_eq!(store.get_at::<Document>(key::SAVED_DOCUMENT, written), None);
}

#[test]
fn two_stores_share_one_backend_without_crossing_namespaces() {
	let backend = Arc::new(MemoryBackend::new());
	let wizard = TtlStore::new(backend.clone());
	let other = TtlStore::with_namespace(backend, "other_app_");

	wizard.set(key::MFA_METHOD, &"sms".to_owned());
	other.set(key::MFA_METHOD, &"email".to_owned());

	assert_eq!(wizard.get::<String>(key::MFA_METHOD), Some("sms".to_owned()));
	assert_eq!(other.get::<String>(key::MFA_METHOD), Some("email".to_owned()));

	wizard.clear();

	assert_eq!(wizard.get::<String>(key::MFA_METHOD), None);
	assert_eq!(other.get::<String>(key::MFA_METHOD), Some("email".to_owned()));
}

#[test]
fn file_backend_snapshot_survives_a_new_store() {
	let path = temp_snapshot_path("it");

	{
		let backend = Arc::new(
			FileBackend::open(&path).expect("File backend should initialize in the temp dir."),
		);
		let store = TtlStore::new(backend);

		store.set(key::SAVED_DOCUMENT, &"remembered".to_owned());
	}

	let backend =
		Arc::new(FileBackend::open(&path).expect("File backend should reopen the snapshot."));
	let reopened = TtlStore::new(backend);

	assert_eq!(
		reopened.get::<String>(key::SAVED_DOCUMENT),
		Some("remembered".to_owned()),
	);

	std::fs::remove_file(&path).expect("Temp snapshot should be removable.");
}

#[test]
fn construction_sweep_drops_stale_records_from_a_reopened_snapshot() {
	let path = temp_snapshot_path("sweep");

	{
		let backend =
			FileBackend::open(&path).expect("File backend should initialize in the temp dir.");

		backend
			.write("auth_wizard_stale", "{\"value\":\"old\",\"expires_at\":0}")
			.expect("Seeding the stale record should succeed.");
		backend
			.write("auth_wizard_fresh", "{\"value\":\"new\"}")
			.expect("Seeding the fresh record should succeed.");
	}

	let backend =
		Arc::new(FileBackend::open(&path).expect("File backend should reopen the snapshot."));
	let store = TtlStore::new(backend.clone());

	assert_eq!(store.get::<String>("stale"), None);
	assert_eq!(store.get::<String>("fresh"), Some("new".to_owned()));
	assert_eq!(
		backend.read("auth_wizard_stale").expect("Backend read should succeed."),
		None,
		"The sweep must delete the stale record from the snapshot itself.",
	);

	std::fs::remove_file(&path).expect("Temp snapshot should be removable.");
}

//! Headless multi-step login wizard for hosted identity-provider pages: TTL storage, declarative
//! field validation, OTP and password widgets, and page controllers in one crate.
//!
//! Every widget and page is a deterministic state machine: hosts feed user events in and render
//! the returned view descriptions however they like (DOM shell, TUI, test harness). Nothing in
//! the crate touches a rendering target, performs network I/O, or holds global state. Storage
//! backends, claim sinks, and flow configuration are injected explicitly.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod obs;
pub mod pages;
pub mod store;
pub mod timer;
pub mod validate;
pub mod widget;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;

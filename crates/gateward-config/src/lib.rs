//! Persistence bridge for the Gateward allow-list.
//!
//! The permanent whitelist and its sibling config flags live in one
//! structured file per instance. This crate owns that file:
//!
//! 1. **The document**, [`GateDoc`]: `whitelist` (enabled flag),
//!    `language`, `whitelisted` (the permanent names)
//! 2. **The store**, [`ConfigStore`]: load with default seeding and
//!    fail-open recovery, save as a full rewrite
//!
//! Temporary entries are never persisted; they are process-lifetime
//! state owned entirely by the roster.
//!
//! # Failure posture
//!
//! Persistence failures must never take down the allow/deny path. The
//! plain [`ConfigStore::load`] / [`ConfigStore::save`] pair logs and
//! recovers; the `try_*` variants return the underlying
//! [`ConfigError`] for callers (and tests) that want it.

mod doc;
mod error;
mod store;

pub use doc::GateDoc;
pub use error::ConfigError;
pub use store::ConfigStore;

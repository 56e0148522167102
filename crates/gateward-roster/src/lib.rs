//! In-memory allow-list roster for Gateward.
//!
//! This crate holds the data at the heart of the whitelist:
//!
//! 1. **Permanent entries**: usernames allowed until explicitly removed
//! 2. **Temporary entries**: usernames allowed until an expiry instant
//! 3. **The access check**: [`Roster::is_allowed`], combining both
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade layer (above)  ← wraps the roster in a shared, locked handle
//!     ↕
//! Policy layer          ← validates names/durations before mutating
//!     ↕
//! Roster (this crate)   ← pure data + invariants, no I/O, no locking
//! ```
//!
//! Temporary entries live for the process lifetime only. They are never
//! persisted, and expiry is lazy: an entry past its instant is invisible
//! to reads but stays in the map until an explicit sweep.

mod roster;

pub use roster::Roster;

/// Lowercase normalization applied to every username before any lookup
/// or mutation. All equality in the roster is over this form.
pub fn canonical(name: &str) -> String {
    name.to_lowercase()
}

//! Mutation policy for the Gateward allow-list.
//!
//! The roster crate stores entries; this crate decides which mutations
//! are acceptable and turns silent no-ops into actionable outcomes:
//!
//! 1. **Validation**: username shape ([`is_valid_username`]) and the
//!    duration grammar ([`parse_duration`]); pure functions, no I/O
//! 2. **The Gate**: [`Gate`] wraps a [`Roster`](gateward_roster::Roster)
//!    together with the enabled flag and language code, and exposes the
//!    `request_*` mutation API
//! 3. **Outcomes**: [`PolicyError`] for rejected requests, [`Removal`]
//!    for what a remove actually hit, [`Verdict`] for the login decision
//!
//! Every validation runs before any mutation: a rejected request leaves
//! no partial state change behind.

mod duration;
mod error;
mod gate;
mod validate;

pub use duration::{format_duration, parse_duration};
pub use error::PolicyError;
pub use gate::{Gate, Removal, Verdict};
pub use validate::is_valid_username;

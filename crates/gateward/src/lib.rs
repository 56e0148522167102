//! # Gateward
//!
//! Player-access allow-list for multiplayer game proxies.
//!
//! Gateward decides, at connection time, whether an incoming user may
//! proceed: a persisted set of permanent entries plus process-lifetime
//! temporary entries with expiries. The proxy host owns the wire and the
//! command parser; Gateward owns the state, the policy, and the file.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gateward::Whitelist;
//!
//! # async fn run() -> Result<(), gateward::GatewardError> {
//! let wl = Whitelist::open("data/whitelist.json").await;
//!
//! wl.add("steve").await?;
//! wl.add_temp("visitor_7", "1h30m").await?;
//!
//! if wl.check("steve").await.permits() {
//!     // let the connection through
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! ```text
//! gateward (this crate)   ← shared handle, command surface, login check
//!     ↕
//! gateward-policy         ← validation, duration grammar, mutation policy
//!     ↕
//! gateward-roster         ← permanent set + temporary map, expiry rules
//!
//! gateward-config         ← the on-disk document (loaded/saved beside)
//! ```

mod error;
mod whitelist;

pub use error::GatewardError;
pub use whitelist::Whitelist;

pub use gateward_config::{ConfigError, ConfigStore, GateDoc};
pub use gateward_policy::{
    PolicyError, Removal, Verdict, format_duration, is_valid_username,
    parse_duration,
};
pub use gateward_roster::Roster;

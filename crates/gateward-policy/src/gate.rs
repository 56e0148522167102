//! The gate: policy state and the `request_*` mutation API.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use gateward_roster::Roster;

use crate::{PolicyError, is_valid_username};

/// What a remove request actually hit.
///
/// Removal attempts both stores in one call; the caller learns which
/// and, in particular, whether the permanent set changed, which is what
/// decides if a persistence save is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Only the permanent set held the name.
    Permanent,
    /// Only the temporary map held the name (live or expired).
    Temporary,
    /// Both stores held the name.
    Both,
}

impl Removal {
    /// Did this removal change the permanent set (and so require a save)?
    pub fn touched_permanent(&self) -> bool {
        matches!(self, Removal::Permanent | Removal::Both)
    }
}

/// The login decision at the access-check boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The whitelist feature is switched off: everyone passes, the
    /// roster is never consulted.
    Disabled,
    /// The name is on the list (permanent or live temporary).
    Allowed,
    /// The whitelist is on and the name is not on it.
    Denied,
}

impl Verdict {
    /// May the connection proceed?
    pub fn permits(&self) -> bool {
        !matches!(self, Verdict::Denied)
    }
}

/// Policy state: the roster plus the config flags that travel with it.
///
/// One `Gate` exists per running process, explicitly constructed from the
/// persisted document and threaded through by handle; there is no hidden
/// global. Like the roster it wraps, `Gate` is not thread-safe by itself;
/// the facade layer owns the lock.
#[derive(Debug)]
pub struct Gate {
    roster: Roster,
    enabled: bool,
    language: String,
}

impl Gate {
    /// Builds a gate from loaded state.
    pub fn new<I>(enabled: bool, language: impl Into<String>, permanent: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            roster: Roster::with_permanent(permanent),
            enabled,
            language: language.into(),
        }
    }

    // -- Flags ------------------------------------------------------------

    /// Is the whitelist feature switched on?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the enabled switch. Always succeeds; returns the previous
    /// state so the caller can tell a real change from a no-op.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let previous = self.enabled;
        self.enabled = enabled;
        if previous != enabled {
            tracing::info!(enabled, "whitelist toggled");
        }
        previous
    }

    /// The active language code (honored by message glue, not by this
    /// layer).
    pub fn language(&self) -> &str {
        &self.language
    }

    // -- Access check -----------------------------------------------------

    /// The access-check boundary: the disabled flag short-circuits the
    /// evaluator entirely; otherwise permanent OR live temporary allows.
    pub fn check(&self, name: &str) -> Verdict {
        if !self.enabled {
            return Verdict::Disabled;
        }
        if self.roster.is_allowed(name) {
            Verdict::Allowed
        } else {
            Verdict::Denied
        }
    }

    // -- Mutation API -----------------------------------------------------

    /// Adds a permanent entry.
    ///
    /// # Errors
    /// - [`PolicyError::InvalidName`]: malformed username
    /// - [`PolicyError::AlreadyPresent`]: already on the permanent list
    pub fn request_add_permanent(&mut self, name: &str) -> Result<(), PolicyError> {
        if !is_valid_username(name) {
            return Err(PolicyError::InvalidName(name.to_string()));
        }
        if self.roster.contains_permanent(name) {
            return Err(PolicyError::AlreadyPresent(name.to_string()));
        }
        self.roster.add_permanent(name);
        Ok(())
    }

    /// Adds a temporary entry expiring `duration` from now.
    ///
    /// A temporary add never silently extends: if the name already has a
    /// live temporary entry, or is permanent, the request is rejected
    /// and the caller must use the explicit extend operation. An expired
    /// leftover entry does not block the add; it is simply overwritten.
    ///
    /// # Errors
    /// - [`PolicyError::InvalidName`]: malformed username
    /// - [`PolicyError::InvalidDuration`]: zero duration
    /// - [`PolicyError::AlreadyPresent`]: permanent, or live temporary
    pub fn request_add_temporary(
        &mut self,
        name: &str,
        duration: Duration,
    ) -> Result<(), PolicyError> {
        if !is_valid_username(name) {
            return Err(PolicyError::InvalidName(name.to_string()));
        }
        if duration.is_zero() {
            return Err(PolicyError::InvalidDuration("0s".to_string()));
        }
        if self.roster.contains_permanent(name)
            || self.roster.contains_temporary_active(name)
        {
            return Err(PolicyError::AlreadyPresent(name.to_string()));
        }
        self.roster.add_temporary(name, Instant::now() + duration);
        Ok(())
    }

    /// Removes a name from both stores, reporting what was hit.
    ///
    /// # Errors
    /// [`PolicyError::NotPresent`] when neither store held the name.
    pub fn request_remove(&mut self, name: &str) -> Result<Removal, PolicyError> {
        let permanent = self.roster.remove_permanent(name);
        let temporary = self.roster.remove_temporary(name);
        match (permanent, temporary) {
            (true, true) => Ok(Removal::Both),
            (true, false) => Ok(Removal::Permanent),
            (false, true) => Ok(Removal::Temporary),
            (false, false) => Err(PolicyError::NotPresent(name.to_string())),
        }
    }

    /// Resets a live temporary entry's expiry to now + `duration`.
    ///
    /// An expired entry cannot be extended, swept or not; once access
    /// lapses, re-granting it goes through the add path.
    ///
    /// # Errors
    /// - [`PolicyError::InvalidDuration`]: zero duration (checked first)
    /// - [`PolicyError::NotPresent`]: no live temporary entry to extend
    pub fn request_extend_temporary(
        &mut self,
        name: &str,
        duration: Duration,
    ) -> Result<(), PolicyError> {
        if duration.is_zero() {
            return Err(PolicyError::InvalidDuration("0s".to_string()));
        }
        if !self.roster.contains_temporary_active(name) {
            return Err(PolicyError::NotPresent(name.to_string()));
        }
        self.roster.extend_temporary(name, duration);
        Ok(())
    }

    // -- Maintenance and snapshots ----------------------------------------

    /// Drops every temporary entry whose expiry is at or before `now`.
    pub fn sweep_expired(&mut self, now: Instant) {
        self.roster.sweep_expired(now);
    }

    /// Replaces the permanent set and flags from a freshly-loaded
    /// document (reload path). Temporary entries survive; the file
    /// knows nothing about them.
    pub fn apply_loaded<I>(&mut self, enabled: bool, language: impl Into<String>, permanent: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.enabled = enabled;
        self.language = language.into();
        self.roster.replace_permanent(permanent);
    }

    /// Copy of the permanent set (for listing and for the save path).
    pub fn snapshot_permanent(&self) -> HashSet<String> {
        self.roster.snapshot_permanent()
    }

    /// Copy of the temporary map, expiries included.
    pub fn snapshot_temporary(&self) -> HashMap<String, Instant> {
        self.roster.snapshot_temporary()
    }
}

// =========================================================================
// Tests
// =========================================================================

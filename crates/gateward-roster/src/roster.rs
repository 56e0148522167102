//! The roster: tracks permanent and temporary allow-list entries.
//!
//! # Concurrency note
//!
//! `Roster` is NOT thread-safe by itself: it uses plain collections, not
//! concurrent ones. This is intentional: the roster is owned by a single
//! shared handle one layer up and accessed through a lock there. Keeping
//! it simple here avoids hidden locking overhead.
//!
//! # Expiry model
//!
//! Temporary entries are checked against a fresh wall-clock read on every
//! lookup. Nothing removes an expired entry automatically; it simply stops
//! matching. [`Roster::sweep_expired`] exists to reclaim the map slots,
//! and correctness never depends on it running.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::canonical;

/// The in-memory allow-list state.
///
/// Both membership checks are independent: a name may be permanent and
/// hold a temporary entry at the same time, and neither store dedups
/// against the other.
#[derive(Debug, Default)]
pub struct Roster {
    /// Indefinitely-allowed usernames, in canonical (lowercase) form.
    permanent: HashSet<String>,

    /// Time-limited usernames, canonical form → absolute expiry.
    ///
    /// Never persisted; this map starts empty on every process run.
    temporary: HashMap<String, Instant>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster pre-populated with permanent entries, as loaded
    /// from persisted storage at startup. Names are canonicalized here,
    /// so callers may pass them in any case.
    pub fn with_permanent<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            permanent: names
                .into_iter()
                .map(|n| canonical(n.as_ref()))
                .collect(),
            temporary: HashMap::new(),
        }
    }

    /// Replaces the permanent set wholesale (reload path). Temporary
    /// entries are untouched; the persisted file knows nothing about them.
    pub fn replace_permanent<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.permanent = names
            .into_iter()
            .map(|n| canonical(n.as_ref()))
            .collect();
    }

    // -- Reads ------------------------------------------------------------

    /// Is this name on the permanent list?
    ///
    /// Unknown or empty input is simply `false`; there are no error conditions.
    pub fn contains_permanent(&self, name: &str) -> bool {
        self.permanent.contains(&canonical(name))
    }

    /// Does this name hold a temporary entry that is still live?
    ///
    /// True only if an entry exists AND its expiry is strictly after a
    /// wall-clock "now" read here, at call time. No caching: a result
    /// can flip from `true` to `false` between two calls with no
    /// mutation in between.
    pub fn contains_temporary_active(&self, name: &str) -> bool {
        match self.temporary.get(&canonical(name)) {
            Some(expiry) => *expiry > Instant::now(),
            None => false,
        }
    }

    /// The access check: permanent OR live temporary.
    ///
    /// Stateless over the two membership reads; evaluated fresh on every
    /// call so a moving "now" is always honored.
    pub fn is_allowed(&self, name: &str) -> bool {
        self.contains_permanent(name) || self.contains_temporary_active(name)
    }

    // -- Mutations --------------------------------------------------------

    /// Adds a permanent entry. Idempotent: re-adding a present name is a
    /// no-op at this layer. Duplicate policy (whether that is an error)
    /// belongs to the policy layer above.
    pub fn add_permanent(&mut self, name: &str) {
        let canon = canonical(name);
        if self.permanent.insert(canon.clone()) {
            tracing::debug!(name = %canon, "permanent entry added");
        }
    }

    /// Removes a permanent entry. Returns whether it was present.
    pub fn remove_permanent(&mut self, name: &str) -> bool {
        let canon = canonical(name);
        let removed = self.permanent.remove(&canon);
        if removed {
            tracing::debug!(name = %canon, "permanent entry removed");
        }
        removed
    }

    /// Adds a temporary entry expiring at `expiry`, unconditionally
    /// overwriting any existing expiry for the name.
    pub fn add_temporary(&mut self, name: &str, expiry: Instant) {
        let canon = canonical(name);
        self.temporary.insert(canon.clone(), expiry);
        tracing::debug!(name = %canon, "temporary entry added");
    }

    /// Removes a temporary entry (live or expired). Returns whether one
    /// was present.
    pub fn remove_temporary(&mut self, name: &str) -> bool {
        let canon = canonical(name);
        let removed = self.temporary.remove(&canon).is_some();
        if removed {
            tracing::debug!(name = %canon, "temporary entry removed");
        }
        removed
    }

    /// Conditionally resets an existing temporary entry's expiry to
    /// `now + duration`. Returns `false`, and creates nothing, if the
    /// name has no temporary entry. Distinct from [`add_temporary`]:
    /// this is an update, never an insert.
    ///
    /// [`add_temporary`]: Roster::add_temporary
    pub fn extend_temporary(&mut self, name: &str, duration: Duration) -> bool {
        let canon = canonical(name);
        match self.temporary.get_mut(&canon) {
            Some(expiry) => {
                *expiry = Instant::now() + duration;
                tracing::debug!(name = %canon, "temporary entry extended");
                true
            }
            None => false,
        }
    }

    /// Removes every temporary entry whose expiry is at or before `now`.
    ///
    /// Maintenance only. Reads never require this; an expired entry is
    /// already invisible to [`contains_temporary_active`].
    ///
    /// [`contains_temporary_active`]: Roster::contains_temporary_active
    pub fn sweep_expired(&mut self, now: Instant) {
        let before = self.temporary.len();
        self.temporary.retain(|_, expiry| *expiry > now);
        let swept = before - self.temporary.len();
        if swept > 0 {
            tracing::debug!(swept, "expired temporary entries swept");
        }
    }

    // -- Snapshots --------------------------------------------------------

    /// An independent copy of the permanent set. Mutating the returned
    /// set does not touch the roster (copy-on-read).
    pub fn snapshot_permanent(&self) -> HashSet<String> {
        self.permanent.clone()
    }

    /// An independent copy of the temporary map, expired entries
    /// included; callers that only want live ones filter against their
    /// own "now".
    pub fn snapshot_temporary(&self) -> HashMap<String, Instant> {
        self.temporary.clone()
    }

    /// Number of permanent entries.
    pub fn permanent_len(&self) -> usize {
        self.permanent.len()
    }

    /// Number of temporary entries still physically in the map, live or
    /// not.
    pub fn temporary_len(&self) -> usize {
        self.temporary.len()
    }
}

// =========================================================================
// Tests
// =========================================================================

//! The shared whitelist handle and its command surface.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use gateward_config::{ConfigStore, GateDoc};
use gateward_policy::{Gate, Removal, Verdict, parse_duration};
use tokio::sync::{Mutex, RwLock};

use crate::GatewardError;

/// Shared whitelist state behind a cheap-clone handle.
///
/// One `Whitelist` exists per proxy instance; clones share the same
/// state. Login checks take the read lock, command execution takes the
/// write lock, so concurrent admission decisions never contend with
/// each other.
///
/// # Persistence discipline
///
/// Mutations that touch the permanent set or the config flags snapshot
/// the document while still holding the lock, release it, and only then
/// write the file. I/O never runs under the lock, and a failed write is
/// logged; it never fails the mutation that triggered it. Each snapshot
/// carries a generation stamped under the lock; writes run behind a
/// save mutex and a stale snapshot (one outrun by a newer save) is
/// dropped instead of written, so the file never regresses to an older
/// state.
#[derive(Clone)]
pub struct Whitelist {
    inner: Arc<Inner>,
}

struct Inner {
    gate: RwLock<Gate>,
    store: ConfigStore,
    // Bumped under the gate lock when a snapshot is taken.
    snap_gen: AtomicU64,
    // Highest generation already on disk; guards against out-of-order
    // writes between near-simultaneous mutations.
    saved_gen: Mutex<u64>,
}

impl Whitelist {
    /// Opens the whitelist backed by the given config file.
    ///
    /// A missing file is seeded with the default document; an unreadable
    /// or corrupt one is logged and the whitelist starts enabled with an
    /// empty permanent set (fail open to "no access").
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let store = ConfigStore::new(path.as_ref());
        let doc = store.load().await;
        let gate = Gate::new(doc.whitelist, doc.language, doc.whitelisted);
        Self {
            inner: Arc::new(Inner {
                gate: RwLock::new(gate),
                store,
                snap_gen: AtomicU64::new(0),
                saved_gen: Mutex::new(0),
            }),
        }
    }

    // -- Access check boundary --------------------------------------------

    /// Decides whether `name` may connect right now.
    ///
    /// [`Verdict::Disabled`] means the feature is off and everyone
    /// passes; a denial is logged the way the proxy operator expects to
    /// see it.
    pub async fn check(&self, name: &str) -> Verdict {
        let verdict = self.inner.gate.read().await.check(name);
        if verdict == Verdict::Denied {
            tracing::info!(%name, "player denied access (not whitelisted)");
        }
        verdict
    }

    /// Is the whitelist feature currently switched on?
    pub async fn enabled(&self) -> bool {
        self.inner.gate.read().await.enabled()
    }

    /// The configured language code, for the caller's message set.
    pub async fn language(&self) -> String {
        self.inner.gate.read().await.language().to_string()
    }

    // -- Command surface ---------------------------------------------------

    /// `add <name>`: permanent entry; persists on success.
    pub async fn add(&self, name: &str) -> Result<(), GatewardError> {
        let (generation, doc) = {
            let mut gate = self.inner.gate.write().await;
            gate.request_add_permanent(name)?;
            self.stamp_snapshot(&gate)
        };
        self.persist(generation, &doc).await;
        tracing::info!(%name, "player added to whitelist");
        Ok(())
    }

    /// `addtemp <name> <duration>`: temporary entry from a duration
    /// string like `"1h30m"`. Nothing is persisted: temporary entries
    /// live and die with the process. Returns the parsed duration so
    /// the caller can confirm it back to the operator.
    pub async fn add_temp(
        &self,
        name: &str,
        duration: &str,
    ) -> Result<Duration, GatewardError> {
        let duration = parse_duration(duration)?;
        self.inner
            .gate
            .write()
            .await
            .request_add_temporary(name, duration)?;
        tracing::info!(%name, secs = duration.as_secs(), "player temporarily whitelisted");
        Ok(duration)
    }

    /// Resets an existing temporary entry to expire `duration` from now.
    pub async fn extend_temp(
        &self,
        name: &str,
        duration: &str,
    ) -> Result<Duration, GatewardError> {
        let duration = parse_duration(duration)?;
        self.inner
            .gate
            .write()
            .await
            .request_extend_temporary(name, duration)?;
        tracing::info!(%name, secs = duration.as_secs(), "temporary whitelist extended");
        Ok(duration)
    }

    /// `remove <name>`: drops the name from both stores; persists only
    /// when the permanent set actually changed.
    pub async fn remove(&self, name: &str) -> Result<Removal, GatewardError> {
        let (removal, snapshot) = {
            let mut gate = self.inner.gate.write().await;
            let removal = gate.request_remove(name)?;
            let snapshot = removal
                .touched_permanent()
                .then(|| self.stamp_snapshot(&gate));
            (removal, snapshot)
        };
        if let Some((generation, doc)) = snapshot {
            self.persist(generation, &doc).await;
        }
        tracing::info!(%name, ?removal, "player removed from whitelist");
        Ok(removal)
    }

    /// `on`: switches the whitelist on and persists, returning the previous
    /// state so the caller can phrase "enabled" vs "already enabled".
    pub async fn enable(&self) -> bool {
        self.set_enabled(true).await
    }

    /// `off`: switches the whitelist off and persists, returning the
    /// previous state.
    pub async fn disable(&self) -> bool {
        self.set_enabled(false).await
    }

    async fn set_enabled(&self, enabled: bool) -> bool {
        let (previous, generation, doc) = {
            let mut gate = self.inner.gate.write().await;
            let previous = gate.set_enabled(enabled);
            let (generation, doc) = self.stamp_snapshot(&gate);
            (previous, generation, doc)
        };
        self.persist(generation, &doc).await;
        previous
    }

    /// `list`: the permanent names (sorted) and the temporary entries
    /// with their expiries (sorted by name, expired ones included;
    /// rendering liveness is the caller's choice).
    pub async fn list(&self) -> (Vec<String>, Vec<(String, Instant)>) {
        let gate = self.inner.gate.read().await;
        let mut permanent: Vec<String> =
            gate.snapshot_permanent().into_iter().collect();
        permanent.sort();
        let mut temporary: Vec<(String, Instant)> =
            gate.snapshot_temporary().into_iter().collect();
        temporary.sort_by(|a, b| a.0.cmp(&b.0));
        (permanent, temporary)
    }

    /// `reload`: re-reads the config file, replacing the permanent set
    /// and flags. Temporary entries survive: the file knows nothing
    /// about them.
    ///
    /// An unreadable or corrupt file empties the permanent set but
    /// keeps the currently configured enabled flag and language; a bad
    /// edit on disk must not flip switches the operator set at runtime.
    pub async fn reload(&self) {
        match self.inner.store.load_or_seed().await {
            Ok(doc) => {
                let entries = doc.whitelisted.len();
                self.inner
                    .gate
                    .write()
                    .await
                    .apply_loaded(doc.whitelist, doc.language, doc.whitelisted);
                tracing::info!(entries, "whitelist reloaded from disk");
            }
            Err(error) => {
                let mut gate = self.inner.gate.write().await;
                let enabled = gate.enabled();
                let language = gate.language().to_string();
                gate.apply_loaded(enabled, language, std::iter::empty::<&str>());
                tracing::error!(
                    %error,
                    "reload failed, permanent set cleared, configured flags kept"
                );
            }
        }
    }

    // -- Maintenance -------------------------------------------------------

    /// Drops temporary entries whose expiry has passed. Purely a memory
    /// reclaim; reads never depend on it.
    pub async fn sweep(&self) {
        self.inner.gate.write().await.sweep_expired(Instant::now());
    }

    /// Spawns a background task sweeping expired temporary entries every
    /// `period`. Optional: correctness never requires it. Aborting the
    /// returned handle stops the sweeper.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let wl = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // First tick fires immediately; skip it so the cadence is
            // one sweep per period from now.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                wl.sweep().await;
            }
        })
    }

    /// Writes the current state to disk, surfacing any failure.
    ///
    /// The routine mutation paths save with logged-and-swallowed errors;
    /// this is for callers (shutdown hooks, health checks) that want the
    /// result.
    ///
    /// # Errors
    /// [`GatewardError::Config`] when the write fails.
    pub async fn flush(&self) -> Result<(), GatewardError> {
        let (generation, doc) = {
            let gate = self.inner.gate.read().await;
            self.stamp_snapshot(&gate)
        };
        let mut saved = self.inner.saved_gen.lock().await;
        if generation > *saved {
            self.inner.store.try_save(&doc).await?;
            *saved = generation;
        }
        Ok(())
    }

    // -- Save ordering -----------------------------------------------------

    /// Takes a persistable snapshot and stamps it. Must run while the
    /// gate lock is held so generation order matches state order.
    fn stamp_snapshot(&self, gate: &Gate) -> (u64, GateDoc) {
        let generation = self.inner.snap_gen.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, snapshot_doc(gate))
    }

    /// Writes a stamped snapshot, dropping it when a newer one already
    /// reached the file.
    async fn persist(&self, generation: u64, doc: &GateDoc) {
        let mut saved = self.inner.saved_gen.lock().await;
        if generation <= *saved {
            tracing::debug!(generation, "stale snapshot skipped");
            return;
        }
        self.inner.store.save(doc).await;
        *saved = generation;
    }
}

/// Copies the persistable state out of the gate. Runs under the lock;
/// the write itself must not.
fn snapshot_doc(gate: &Gate) -> GateDoc {
    let mut whitelisted: Vec<String> =
        gate.snapshot_permanent().into_iter().collect();
    whitelisted.sort();
    GateDoc {
        whitelist: gate.enabled(),
        language: gate.language().to_string(),
        whitelisted,
    }
}

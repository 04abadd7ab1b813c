//! In-memory passcode store with a background sweeper.
//!
//! Entries live in a plain `HashMap` behind a mutex; every operation takes
//! the lock briefly and never holds it across an await. The store is
//! deliberately volatile: codes do not survive a restart, and that is an
//! accepted property of the system.
//!
//! Expired entries disappear two ways. A lookup that observes an expired
//! entry removes it on the spot, and a sweeper task walks the whole table
//! on a fixed interval so entries nobody ever looks up again cannot pile
//! up. The sweeper is owned by the store, stoppable, and joined on
//! shutdown.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use ta_core::domain::entities::otp::OtpEntry;
use ta_core::services::otp::{OtpStore, OtpStoreError};

/// Default interval between sweeps of the whole table
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// In-memory [`OtpStore`] keyed by phone number.
///
/// Share it through an `Arc`; all methods take `&self`.
pub struct MemoryOtpStore {
    entries: Arc<Mutex<HashMap<String, OtpEntry>>>,
    sweeper: Mutex<Option<SweeperHandle>>,
}

impl MemoryOtpStore {
    /// Creates an empty store without a sweeper.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            sweeper: Mutex::new(None),
        }
    }

    /// Creates a store and starts its sweeper at the default interval.
    pub fn with_sweeper() -> Self {
        let store = Self::new();
        store.start_sweeper(DEFAULT_SWEEP_INTERVAL);
        store
    }

    /// Starts the background sweeper. A second call is a no-op while one
    /// is already running. Must be called from within a tokio runtime.
    pub fn start_sweeper(&self, interval: Duration) {
        let mut guard = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return;
        }

        let entries = Arc::clone(&self.entries);
        let (shutdown, mut signal) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // the first tick completes immediately

            loop {
                tokio::select! {
                    _ = signal.changed() => {
                        debug!("passcode sweeper stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = sweep(&entries);
                        if removed > 0 {
                            debug!(removed, "swept expired verification codes");
                        }
                    }
                }
            }
        });

        *guard = Some(SweeperHandle { shutdown, task });
    }

    /// Stops the sweeper and waits for it to finish. Safe to call when no
    /// sweeper is running.
    pub async fn shutdown(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(SweeperHandle { shutdown, task }) = handle {
            let _ = shutdown.send(true);
            if let Err(err) = task.await {
                warn!(error = %err, "passcode sweeper did not shut down cleanly");
            }
        }
    }

    /// Removes every expired entry, returning how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        sweep(&self.entries)
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Whether any entry, live or expired, exists for the phone
    pub fn contains(&self, phone: &str) -> bool {
        self.lock_entries().contains_key(phone)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, OtpEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

// Dropping the store drops the watch sender, which ends the sweeper task
// on its next loop iteration even if shutdown() was never called.

fn sweep(entries: &Mutex<HashMap<String, OtpEntry>>) -> usize {
    let mut map = entries.lock().unwrap_or_else(PoisonError::into_inner);
    let before = map.len();
    map.retain(|_, entry| !entry.is_expired());
    before - map.len()
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn set(&self, phone: &str, entry: OtpEntry) -> Result<(), OtpStoreError> {
        self.lock_entries().insert(phone.to_string(), entry);
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<OtpEntry, OtpStoreError> {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match map.get(phone) {
            None => Err(OtpStoreError::NotFound),
            Some(entry) if entry.is_expired() => {
                map.remove(phone);
                Err(OtpStoreError::Expired)
            }
            Some(entry) => Ok(entry.clone()),
        }
    }

    async fn delete(&self, phone: &str) -> Result<(), OtpStoreError> {
        self.lock_entries().remove(phone);
        Ok(())
    }
}

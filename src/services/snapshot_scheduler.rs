//! Debounced thumbnail capture.
//!
//! Every navigation asks for a fresh thumbnail, but capturing the screen is an
//! expensive bitmap operation. [`SnapshotScheduler`] keeps one timer slot per tab:
//! a new request replaces (and aborts) the previous timer, and only a timer that
//! survives the full quiet period turns into a capture. Timers that fire while the
//! tab switcher is on screen are re-armed, since the capture would show the switcher
//! rather than the page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::managers::tab_registry::{SharedRegistry, TabRegistryTrait};
use crate::services::screen_capture::ScreenCaptureService;
use crate::types::capture::CaptureOptions;
use crate::types::errors::SnapshotError;
use crate::types::tab::{TabId, TabUpdate};

/// Default quiet period between the last request and the capture.
pub const DEFAULT_SNAPSHOT_DELAY: Duration = Duration::from_millis(500);

/// How a snapshot request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The thumbnail was written to the tab.
    Stored,
    /// The capture succeeded but the tab was closed in the meantime.
    TabClosed,
    /// A later request for the same tab, or a cancellation, replaced this one.
    Superseded,
}

type SnapshotResult = Result<SnapshotOutcome, SnapshotError>;

/// Handle to the result of a [`SnapshotScheduler::request_snapshot`] call.
///
/// Dropping the ticket does not cancel the snapshot.
#[derive(Debug)]
pub struct SnapshotTicket {
    tab_id: TabId,
    rx: oneshot::Receiver<SnapshotResult>,
}

impl SnapshotTicket {
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Waits for the request to settle.
    pub async fn outcome(self) -> SnapshotResult {
        // The sender only goes away without a value when the timer task is aborted.
        self.rx.await.unwrap_or(Ok(SnapshotOutcome::Superseded))
    }
}

struct PendingSnapshot {
    generation: u64,
    url: String,
    handle: JoinHandle<()>,
}

type PendingMap = Arc<Mutex<HashMap<TabId, PendingSnapshot>>>;

/// Per-tab debounced screen capture writing thumbnails back into the registry.
pub struct SnapshotScheduler<C: ScreenCaptureService> {
    registry: SharedRegistry,
    capture: Arc<C>,
    options: CaptureOptions,
    delay: Duration,
    switcher: watch::Sender<bool>,
    pending: PendingMap,
    next_generation: AtomicU64,
}

impl<C: ScreenCaptureService> SnapshotScheduler<C> {
    pub fn new(registry: SharedRegistry, capture: Arc<C>, options: CaptureOptions) -> Self {
        Self::with_delay(registry, capture, options, DEFAULT_SNAPSHOT_DELAY)
    }

    pub fn with_delay(
        registry: SharedRegistry,
        capture: Arc<C>,
        options: CaptureOptions,
        delay: Duration,
    ) -> Self {
        let (switcher, _) = watch::channel(false);
        Self {
            registry,
            capture,
            options,
            delay,
            switcher,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn capture_options(&self) -> CaptureOptions {
        self.options
    }

    pub fn switcher_visible(&self) -> bool {
        *self.switcher.borrow()
    }

    /// Publishes tab switcher visibility to all armed timers.
    pub fn set_switcher_visible(&self, visible: bool) {
        self.switcher.send_replace(visible);
    }

    /// Schedules a capture of `tab_id` showing `url` after the quiet period.
    ///
    /// Any timer already armed for the same tab is aborted and its ticket resolves to
    /// [`SnapshotOutcome::Superseded`]. Outside a Tokio runtime nothing is armed and
    /// the ticket resolves to [`SnapshotError::NoRuntime`].
    pub fn request_snapshot(&self, url: &str, tab_id: TabId) -> SnapshotTicket {
        let (tx, rx) = oneshot::channel();
        let Ok(runtime) = Handle::try_current() else {
            warn!(%tab_id, %url, "snapshot requested without a runtime");
            let _ = tx.send(Err(SnapshotError::NoRuntime));
            return SnapshotTicket { tab_id, rx };
        };
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let timer = SnapshotTimer {
            registry: self.registry.clone(),
            capture: self.capture.clone(),
            options: self.options,
            delay: self.delay,
            switcher: self.switcher.subscribe(),
            pending: self.pending.clone(),
            tab_id,
            url: url.to_string(),
            generation,
        };

        let mut pending = self.pending.lock();
        let handle = runtime.spawn(timer.run(tx));
        let replaced = pending.insert(
            tab_id,
            PendingSnapshot {
                generation,
                url: url.to_string(),
                handle,
            },
        );
        if let Some(previous) = replaced {
            previous.handle.abort();
            debug!(%tab_id, superseded_url = %previous.url, %url, "snapshot request superseded");
        } else {
            debug!(%tab_id, %url, delay_ms = self.delay.as_millis() as u64, "snapshot scheduled");
        }

        SnapshotTicket { tab_id, rx }
    }

    /// Captures `tab_id` right away, dropping any armed timer for it.
    ///
    /// Used right before the tab switcher opens so its thumbnail is current.
    pub async fn capture_now(&self, url: &str, tab_id: TabId) -> SnapshotResult {
        self.cancel(&tab_id);
        capture_into(&self.registry, self.capture.as_ref(), self.options, url, tab_id).await
    }

    /// Aborts the armed timer for `tab_id`. Returns whether one was armed.
    pub fn cancel(&self, tab_id: &TabId) -> bool {
        match self.pending.lock().remove(tab_id) {
            Some(previous) => {
                previous.handle.abort();
                debug!(%tab_id, "snapshot cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, previous) in self.pending.lock().drain() {
            previous.handle.abort();
        }
    }

    pub fn is_pending(&self, tab_id: &TabId) -> bool {
        self.pending.lock().contains_key(tab_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl<C: ScreenCaptureService> Drop for SnapshotScheduler<C> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// State moved into the spawned timer task.
struct SnapshotTimer<C: ScreenCaptureService> {
    registry: SharedRegistry,
    capture: Arc<C>,
    options: CaptureOptions,
    delay: Duration,
    switcher: watch::Receiver<bool>,
    pending: PendingMap,
    tab_id: TabId,
    url: String,
    generation: u64,
}

impl<C: ScreenCaptureService> SnapshotTimer<C> {
    async fn run(self, tx: oneshot::Sender<SnapshotResult>) {
        loop {
            tokio::time::sleep(self.delay).await;
            if !*self.switcher.borrow() {
                break;
            }
            debug!(tab_id = %self.tab_id, "tab switcher visible, re-arming snapshot");
        }

        // Release the slot before capturing so the next request starts cleanly.
        {
            let mut pending = self.pending.lock();
            match pending.get(&self.tab_id) {
                Some(slot) if slot.generation == self.generation => {
                    pending.remove(&self.tab_id);
                }
                _ => return,
            }
        }

        let result = capture_into(
            &self.registry,
            self.capture.as_ref(),
            self.options,
            &self.url,
            self.tab_id,
        )
        .await;
        let _ = tx.send(result);
    }
}

async fn capture_into<C: ScreenCaptureService>(
    registry: &SharedRegistry,
    capture: &C,
    options: CaptureOptions,
    url: &str,
    tab_id: TabId,
) -> SnapshotResult {
    match capture.capture(options).await {
        Ok(thumbnail) => {
            let stored = registry
                .lock()
                .update_tab(&tab_id, TabUpdate::snapshot(url, thumbnail));
            if stored {
                debug!(%tab_id, %url, "thumbnail stored");
                Ok(SnapshotOutcome::Stored)
            } else {
                debug!(%tab_id, "tab closed before thumbnail was stored");
                Ok(SnapshotOutcome::TabClosed)
            }
        }
        Err(err) => {
            error!(%tab_id, %url, error = %err, "failed to capture tab thumbnail");
            Err(SnapshotError::CaptureFailed(err))
        }
    }
}

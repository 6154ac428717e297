//! Tab lifecycle controller.
//!
//! Keeps the active-tab selection and tab switcher visibility coherent while the
//! registry changes: bootstraps the first tab, restores the selection on mount,
//! picks the next tab when the active one closes, and drives the snapshot
//! scheduler on navigation and visibility events.

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::managers::tab_registry::{SharedRegistry, TabRegistryTrait};
use crate::services::screen_capture::ScreenCaptureService;
use crate::services::snapshot_scheduler::{SnapshotScheduler, SnapshotTicket};
use crate::services::url_input::{self, UrlResolver};
use crate::types::errors::TabError;
use crate::types::tab::{TabId, TabUpdate};

/// Visibility of the tab switcher overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitcherState {
    #[default]
    Hidden,
    Visible,
}

/// Observable state of the browser's tab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    NoTabs,
    Tabs(SwitcherState),
}

pub struct TabLifecycleController<C: ScreenCaptureService> {
    registry: SharedRegistry,
    scheduler: SnapshotScheduler<C>,
    resolver: UrlResolver,
    switcher: SwitcherState,
    current_url: Option<String>,
    /// Tab ids as last seen by this controller, for reconciliation.
    known_tabs: Vec<TabId>,
}

impl<C: ScreenCaptureService> TabLifecycleController<C> {
    pub fn new(registry: SharedRegistry, scheduler: SnapshotScheduler<C>) -> Self {
        let known_tabs = registry.lock().tab_ids();
        Self {
            registry,
            scheduler,
            resolver: UrlResolver::default(),
            switcher: SwitcherState::Hidden,
            current_url: None,
            known_tabs,
        }
    }

    /// Replaces the resolver used for address bar input.
    pub fn with_url_resolver(mut self, resolver: UrlResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn url_resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &SnapshotScheduler<C> {
        &self.scheduler
    }

    /// Url currently shown by the browser, if any tab is selected.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Tab ids as cached by the controller at the last mutation or reconcile.
    pub fn tab_ids(&self) -> &[TabId] {
        &self.known_tabs
    }

    pub fn state(&self) -> LifecycleState {
        if self.known_tabs.is_empty() {
            LifecycleState::NoTabs
        } else {
            LifecycleState::Tabs(self.switcher)
        }
    }

    /// Opens a tab on the home url when the registry starts out empty.
    pub fn initialize(&mut self) -> Option<TabId> {
        let created = {
            let mut registry = self.registry.lock();
            if registry.is_empty() {
                Some(registry.create_tab(None))
            } else {
                None
            }
        };
        if let Some(id) = created {
            debug!(tab_id = %id, "created initial tab");
        }
        self.refresh_known_tabs();
        created
    }

    /// Restores the selection when the browser screen mounts.
    ///
    /// `stored_active` wins if that tab still exists; otherwise the first tab is
    /// selected. Returns the selected tab.
    pub fn mount(&mut self, stored_active: Option<&TabId>) -> Option<TabId> {
        let target = {
            let registry = self.registry.lock();
            stored_active
                .filter(|id| registry.get_tab(id).is_some())
                .copied()
                .or_else(|| registry.tab_ids().first().copied())
        };
        self.refresh_known_tabs();
        let id = target?;
        self.switch_to_tab(&id).ok()?;
        Some(id)
    }

    /// Opens a new tab on `url` (or the home url) and switches to it.
    pub fn new_tab(&mut self, url: Option<&str>) -> TabId {
        let id = self.registry.lock().create_tab(url);
        self.refresh_known_tabs();
        if let Err(err) = self.switch_to_tab(&id) {
            warn!(error = %err, "new tab vanished before it could be selected");
        }
        id
    }

    /// Makes `tab_id` the active tab, hides the switcher and schedules a fresh
    /// thumbnail for it.
    pub fn switch_to_tab(&mut self, tab_id: &TabId) -> Result<(), TabError> {
        let url = self.select(tab_id)?;
        self.set_switcher(SwitcherState::Hidden);
        if Handle::try_current().is_ok() {
            self.scheduler.request_snapshot(&url, *tab_id);
        } else {
            debug!(%tab_id, "no runtime, skipping snapshot on switch");
        }
        Ok(())
    }

    /// Closes a tab, moving the selection when it was the active one.
    ///
    /// The tab after the closed one is preferred, then the one before it. The switcher
    /// stays as it was unless the last tab goes, which leaves the browser without
    /// tabs; no replacement is opened.
    pub fn close_tab(&mut self, tab_id: &TabId) {
        let closed = self.registry.lock().close_tab(tab_id);
        let Some(closed) = closed else {
            debug!(%tab_id, "close ignored for unknown tab");
            return;
        };
        self.scheduler.cancel(tab_id);
        self.refresh_known_tabs();

        match closed.next_active {
            None => self.enter_no_tabs(),
            Some(next) if closed.was_active => {
                if let Err(err) = self.select(&next) {
                    warn!(error = %err, "failed to select tab after close");
                }
            }
            Some(_) => {}
        }
    }

    pub fn close_all_tabs(&mut self) {
        self.registry.lock().close_all_tabs();
        self.scheduler.cancel_all();
        self.refresh_known_tabs();
        self.enter_no_tabs();
    }

    /// Records a settled navigation and schedules a thumbnail for it.
    ///
    /// Returns `None` when the tab is not in the registry.
    pub fn handle_navigation(&mut self, tab_id: &TabId, url: &str) -> Option<SnapshotTicket> {
        let is_active = {
            let mut registry = self.registry.lock();
            if !registry.update_tab(tab_id, TabUpdate::url(url)) {
                return None;
            }
            registry.is_active(tab_id)
        };
        if is_active {
            self.current_url = Some(url.to_string());
        }
        debug!(%tab_id, host = url_input::host(url).as_deref().unwrap_or(""), "navigation settled");
        Some(self.scheduler.request_snapshot(url, *tab_id))
    }

    /// Loads address bar input in the active tab, searching when it is not an
    /// address. Returns `None` when no tab is active.
    pub fn submit_input(&mut self, input: &str) -> Option<SnapshotTicket> {
        let active = self.registry.lock().active_tab_id()?;
        let url = self.resolver.resolve(input);
        self.handle_navigation(&active, &url)
    }

    /// Opens the tab switcher, capturing the active tab first so its thumbnail is
    /// current. A failed capture is logged and the switcher opens anyway.
    pub async fn show_tabs(&mut self) {
        let active = {
            let registry = self.registry.lock();
            registry.active_tab().map(|t| (t.id, t.url.clone()))
        };
        if let Some((id, url)) = active {
            let url = self.current_url.clone().unwrap_or(url);
            if let Err(err) = self.scheduler.capture_now(&url, id).await {
                debug!(tab_id = %id, error = %err, "opening switcher with a stale thumbnail");
            }
        }
        self.reconcile();
        if self.known_tabs.is_empty() {
            self.enter_no_tabs();
        } else {
            self.set_switcher(SwitcherState::Visible);
        }
    }

    pub fn hide_tabs(&mut self) {
        self.set_switcher(SwitcherState::Hidden);
    }

    /// Re-reads the registry when its tab count no longer matches the cached view,
    /// picking up tabs added or removed by other actors. Returns whether the cache
    /// changed.
    pub fn reconcile(&mut self) -> bool {
        let (count, active) = {
            let registry = self.registry.lock();
            (registry.len(), registry.active_tab().map(|t| t.url.clone()))
        };
        if count == self.known_tabs.len() {
            return false;
        }
        debug!(cached = self.known_tabs.len(), actual = count, "reconciling tab view");
        self.refresh_known_tabs();
        if self.known_tabs.is_empty() {
            self.scheduler.cancel_all();
            self.enter_no_tabs();
        } else if let Some(url) = active {
            self.current_url = Some(url);
        }
        true
    }

    /// Activates `tab_id` and records its url as current. Returns that url.
    fn select(&mut self, tab_id: &TabId) -> Result<String, TabError> {
        let url = {
            let mut registry = self.registry.lock();
            registry.set_active_tab(tab_id)?;
            let url = registry
                .get_tab(tab_id)
                .map(|t| t.url.clone())
                .ok_or(TabError::InvalidTab(*tab_id))?;
            registry.update_tab(tab_id, TabUpdate::url(url.clone()));
            url
        };
        self.current_url = Some(url.clone());
        Ok(url)
    }

    fn refresh_known_tabs(&mut self) {
        self.known_tabs = self.registry.lock().tab_ids();
    }

    fn enter_no_tabs(&mut self) {
        self.current_url = None;
        self.set_switcher(SwitcherState::Hidden);
    }

    fn set_switcher(&mut self, state: SwitcherState) {
        self.switcher = state;
        self.scheduler
            .set_switcher_visible(state == SwitcherState::Visible);
    }
}

//! App core.
//!
//! Owns the session database, settings and the tab lifecycle stack, and runs the
//! startup/shutdown sequences.

use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::session_manager::{SessionManager, SessionStore};
use crate::managers::tab_lifecycle::TabLifecycleController;
use crate::managers::tab_registry::TabRegistry;
use crate::services::screen_capture::ScreenCaptureService;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::snapshot_scheduler::SnapshotScheduler;
use crate::services::url_input::UrlResolver;
use crate::types::errors::SessionError;
use crate::types::tab::TabId;

/// Central application struct wiring registry, controller, scheduler and storage.
pub struct App<C: ScreenCaptureService> {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub session_manager: SessionManager,
    pub tabs: TabLifecycleController<C>,
}

impl<C: ScreenCaptureService> App<C> {
    /// Opens the session database at `db_path` and loads settings from
    /// `settings_path` (or the platform default).
    pub fn new(
        db_path: &str,
        settings_path: Option<String>,
        capture: C,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db, SettingsEngine::new(settings_path), capture))
    }

    pub fn with_database(db: Database, mut settings_engine: SettingsEngine, capture: C) -> Self {
        if let Err(err) = settings_engine.load() {
            warn!(error = %err, path = settings_engine.get_config_path(), "falling back to default settings");
        }
        let settings = settings_engine.get_settings().clone();

        let registry = TabRegistry::shared(settings.home_url.clone());
        let scheduler = SnapshotScheduler::with_delay(
            registry.clone(),
            Arc::new(capture),
            settings.capture,
            settings_engine.snapshot_delay(),
        );

        let db = Arc::new(db);
        Self {
            session_manager: SessionManager::new(db.clone()),
            db,
            settings_engine,
            tabs: TabLifecycleController::new(registry, scheduler)
                .with_url_resolver(UrlResolver::new(settings.search_engine)),
        }
    }

    /// Startup sequence: reopen the saved session if enabled, make sure a tab
    /// exists, and select the previously active one. Returns the selected tab.
    pub fn startup(&mut self) -> Option<TabId> {
        let restored = if self.settings_engine.get_settings().restore_on_launch {
            self.session_manager
                .load_initial_tabs()
                .unwrap_or_else(|err| {
                    warn!(error = %err, "could not restore previous session");
                    None
                })
        } else {
            None
        };

        let stored_active = restored.as_ref().and_then(|data| data.active_tab_id);
        if let Some(data) = restored {
            info!(tabs = data.tabs.len(), "restoring previous session");
            self.tabs
                .registry()
                .lock()
                .restore(data.tabs, data.active_tab_id);
        }

        self.tabs.initialize();
        self.tabs.mount(stored_active.as_ref())
    }

    /// Shutdown sequence: drop armed snapshots and persist the open tabs.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        self.tabs.scheduler().cancel_all();
        let data = SessionManager::snapshot(&self.tabs.registry().lock());
        self.session_manager.save_session(&data)?;
        info!(tabs = data.tabs.len(), "session persisted");
        Ok(())
    }
}

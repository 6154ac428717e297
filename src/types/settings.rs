use serde::{Deserialize, Serialize};

use super::capture::CaptureOptions;

/// Engine used when typed input is a search rather than an address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
}

/// Top-level browser tab settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabSettings {
    /// Url opened by a new tab when none is given.
    pub home_url: String,
    /// Quiet period before a thumbnail is captured after navigation.
    pub snapshot_delay_ms: u64,
    pub capture: CaptureOptions,
    /// Reopen the tabs from the previous run on startup.
    pub restore_on_launch: bool,
    #[serde(default)]
    pub search_engine: SearchEngine,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            home_url: "about:newtab".to_string(),
            snapshot_delay_ms: 500,
            capture: CaptureOptions::default(),
            restore_on_launch: true,
            search_engine: SearchEngine::Google,
        }
    }
}

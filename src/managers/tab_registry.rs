use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::types::errors::TabError;
use crate::types::tab::{Tab, TabId, TabUpdate};

/// Registry handle shared by the lifecycle controller and the snapshot scheduler.
///
/// All mutation goes through the one mutex; never hold the guard across an `.await`.
pub type SharedRegistry = Arc<Mutex<TabRegistry>>;

/// Trait defining the tab registry interface.
pub trait TabRegistryTrait {
    fn create_tab(&mut self, url: Option<&str>) -> TabId;
    fn close_tab(&mut self, tab_id: &TabId) -> Option<ClosedTab>;
    fn close_all_tabs(&mut self);
    fn set_active_tab(&mut self, tab_id: &TabId) -> Result<(), TabError>;
    fn update_tab(&mut self, tab_id: &TabId, update: TabUpdate) -> bool;
    fn list(&self) -> Vec<Tab>;
    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab>;
    fn active_tab_id(&self) -> Option<TabId>;
    fn active_tab(&self) -> Option<&Tab>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// A tab removed by [`TabRegistryTrait::close_tab`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTab {
    pub tab: Tab,
    /// Position the tab held before removal.
    pub index: usize,
    pub was_active: bool,
    /// Active tab after the removal, if any tab is left.
    pub next_active: Option<TabId>,
}

/// In-memory, insertion-ordered registry of open tabs.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
    home_url: String,
}

impl TabRegistry {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            home_url: home_url.into(),
        }
    }

    /// Wraps a new empty registry in a [`SharedRegistry`] handle.
    pub fn shared(home_url: impl Into<String>) -> SharedRegistry {
        Arc::new(Mutex::new(Self::new(home_url)))
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn set_home_url(&mut self, home_url: impl Into<String>) {
        self.home_url = home_url.into();
    }

    pub fn is_active(&self, tab_id: &TabId) -> bool {
        self.active_tab_id.as_ref() == Some(tab_id)
    }

    /// Ids in sequence order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    /// Replaces the registry contents with previously persisted tabs.
    ///
    /// Duplicate ids keep their first occurrence. An active id that is missing or
    /// no longer present falls back to the first tab.
    pub fn restore(&mut self, tabs: Vec<Tab>, active_tab_id: Option<TabId>) {
        let mut seen = HashSet::new();
        self.tabs = tabs
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id);
                if !fresh {
                    warn!(tab_id = %t.id, "dropping duplicate tab from restored session");
                }
                fresh
            })
            .collect();

        self.active_tab_id = match active_tab_id {
            Some(id) if self.find_tab_index(&id).is_some() => Some(id),
            _ => self.tabs.first().map(|t| t.id),
        };
    }

    fn find_tab_index(&self, tab_id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == *tab_id)
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new(crate::types::settings::TabSettings::default().home_url)
    }
}

/// Position of the tab that takes over after the tab at `removed_index` was removed,
/// given `remaining` tabs left.
///
/// The tab that followed the removed one wins; when the removed tab was last, the tab
/// that preceded it is used instead. This precedence is not "nearest neighbour" and
/// must stay as is.
pub fn successor_index(remaining: usize, removed_index: usize) -> Option<usize> {
    if remaining == 0 {
        None
    } else if removed_index < remaining {
        Some(removed_index)
    } else {
        Some(remaining - 1)
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Append a new tab, opening `url` or the home url.
    ///
    /// The active id is left alone unless the registry was empty, in which case the
    /// new tab becomes active.
    fn create_tab(&mut self, url: Option<&str>) -> TabId {
        let tab = Tab::new(url.unwrap_or(&self.home_url));
        let id = tab.id;
        self.tabs.push(tab);
        if self.active_tab_id.is_none() {
            self.active_tab_id = Some(id);
        }
        id
    }

    /// Remove a tab. Returns `None` when the id is unknown.
    fn close_tab(&mut self, tab_id: &TabId) -> Option<ClosedTab> {
        let index = self.find_tab_index(tab_id)?;
        let was_active = self.is_active(tab_id);
        let tab = self.tabs.remove(index);

        if was_active {
            self.active_tab_id =
                successor_index(self.tabs.len(), index).map(|i| self.tabs[i].id);
        }

        Some(ClosedTab {
            tab,
            index,
            was_active,
            next_active: self.active_tab_id,
        })
    }

    fn close_all_tabs(&mut self) {
        self.tabs.clear();
        self.active_tab_id = None;
    }

    fn set_active_tab(&mut self, tab_id: &TabId) -> Result<(), TabError> {
        if self.find_tab_index(tab_id).is_none() {
            return Err(TabError::InvalidTab(*tab_id));
        }
        self.active_tab_id = Some(*tab_id);
        Ok(())
    }

    /// Merge the provided fields into a tab. Returns `false` when the id is unknown.
    fn update_tab(&mut self, tab_id: &TabId, update: TabUpdate) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == *tab_id) else {
            return false;
        };
        if let Some(url) = update.url {
            tab.url = url;
        }
        if let Some(thumbnail) = update.thumbnail {
            tab.thumbnail = Some(thumbnail);
        }
        true
    }

    fn list(&self) -> Vec<Tab> {
        self.tabs.clone()
    }

    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == *tab_id)
    }

    fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_ref().and_then(|id| self.get_tab(id))
    }

    fn len(&self) -> usize {
        self.tabs.len()
    }

    fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

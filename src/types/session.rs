use serde::{Deserialize, Serialize};

use super::tab::{Tab, TabId};

/// Complete registry snapshot for save/restore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
    pub timestamp: i64,
}

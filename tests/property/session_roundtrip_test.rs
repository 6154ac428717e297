//! Property-based tests for session save-restore round-trip.
//!
//! For any valid SessionData, saving then loading through the SessionManager
//! (JSON → SQLite → JSON) yields an equal SessionData, and restoring it into a
//! registry reproduces the order and selection.

use std::sync::Arc;

use proptest::prelude::*;
use uuid::Uuid;
use walletbrowser::database::connection::Database;
use walletbrowser::managers::session_manager::{SessionManager, SessionStore};
use walletbrowser::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use walletbrowser::types::session::SessionData;
use walletbrowser::types::tab::{ImageFormat, Tab, TabId, Thumbnail};

// --- Arbitrary strategies for session types ---

fn arb_tab_id() -> impl Strategy<Value = TabId> {
    any::<u128>().prop_map(|n| TabId::from(Uuid::from_u128(n)))
}

fn arb_thumbnail() -> impl Strategy<Value = Thumbnail> {
    (
        prop_oneof![Just(ImageFormat::Jpg), Just(ImageFormat::Png)],
        1u32..1000,
        1u32..1000,
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(format, width, height, bytes)| Thumbnail {
            format,
            width,
            height,
            bytes,
        })
}

fn arb_tab() -> impl Strategy<Value = Tab> {
    (
        arb_tab_id(),
        "https?://[a-z]{3,15}\\.[a-z]{2,5}/[a-z0-9/_-]{0,30}",
        prop::option::of(arb_thumbnail()),
    )
        .prop_map(|(id, url, thumbnail)| Tab { id, url, thumbnail })
}

fn arb_session_data() -> impl Strategy<Value = SessionData> {
    (
        prop::collection::vec(arb_tab(), 0..8),
        any::<prop::sample::Index>(),
        0i64..2_000_000_000,
    )
        .prop_map(|(tabs, pick, timestamp)| {
            let active_tab_id = if tabs.is_empty() {
                None
            } else {
                Some(tabs[pick.index(tabs.len())].id)
            };
            SessionData {
                tabs,
                active_tab_id,
                timestamp,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn session_save_load_roundtrip(data in arb_session_data()) {
        let db = Arc::new(Database::open_in_memory().expect("in-memory db"));
        let manager = SessionManager::new(db);

        manager.save_session(&data).expect("save_session");
        let loaded = manager.load_initial_tabs().expect("load_initial_tabs");

        prop_assert_eq!(loaded, Some(data));
    }

    #[test]
    fn restored_registry_matches_session(data in arb_session_data()) {
        let mut registry = TabRegistry::new("about:newtab");
        registry.restore(data.tabs.clone(), data.active_tab_id);

        // Generated ids are 128-bit random, so duplicates are not expected here.
        prop_assert_eq!(registry.list(), data.tabs.clone());
        prop_assert_eq!(registry.active_tab_id(), data.active_tab_id);

        let snapshot = SessionManager::snapshot(&registry);
        prop_assert_eq!(snapshot.tabs, data.tabs);
        prop_assert_eq!(snapshot.active_tab_id, data.active_tab_id);
    }
}

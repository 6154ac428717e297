#[path = "../common/mod.rs"]
mod common;

use rstest::rstest;
use walletbrowser::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use walletbrowser::types::errors::TabError;
use walletbrowser::types::tab::{Tab, TabId, TabUpdate};

const HOME: &str = "https://home.example";

fn registry_with(urls: &[&str]) -> (TabRegistry, Vec<TabId>) {
    let mut registry = TabRegistry::new(HOME);
    let ids = urls.iter().map(|u| registry.create_tab(Some(u))).collect();
    (registry, ids)
}

#[test]
fn test_create_tab_returns_unique_ids() {
    let mut registry = TabRegistry::new(HOME);
    let id1 = registry.create_tab(None);
    let id2 = registry.create_tab(None);
    assert_ne!(id1, id2);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_create_tab_with_url_round_trips_through_list() {
    let mut registry = TabRegistry::new(HOME);
    let id = registry.create_tab(Some("https://example.com"));

    let tabs = registry.list();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].id, id);
    assert_eq!(tabs[0].url, "https://example.com");
    assert!(tabs[0].thumbnail.is_none());
}

#[test]
fn test_create_tab_default_url_is_home() {
    let mut registry = TabRegistry::new(HOME);
    let id = registry.create_tab(None);
    assert_eq!(registry.get_tab(&id).unwrap().url, HOME);

    registry.set_home_url("https://other.example");
    let id = registry.create_tab(None);
    assert_eq!(registry.get_tab(&id).unwrap().url, "https://other.example");
}

#[test]
fn test_first_tab_becomes_active() {
    let mut registry = TabRegistry::new(HOME);
    let id = registry.create_tab(None);
    assert_eq!(registry.active_tab_id(), Some(id));
    assert!(registry.is_active(&id));
}

#[test]
fn test_create_tab_keeps_existing_selection() {
    let (mut registry, ids) = registry_with(&["https://a.com"]);
    let second = registry.create_tab(Some("https://b.com"));
    assert_eq!(registry.active_tab_id(), Some(ids[0]));
    assert!(!registry.is_active(&second));
}

#[test]
fn test_list_preserves_insertion_order() {
    let (registry, ids) = registry_with(&["https://a.com", "https://b.com", "https://c.com"]);
    let listed: Vec<TabId> = registry.list().iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
    assert_eq!(registry.tab_ids(), ids);
}

#[test]
fn test_close_unknown_tab_is_noop() {
    let (mut registry, ids) = registry_with(&["https://a.com"]);
    assert!(registry.close_tab(&TabId::new()).is_none());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.active_tab_id(), Some(ids[0]));
}

#[test]
fn test_close_inactive_tab_keeps_selection() {
    let (mut registry, ids) = registry_with(&["https://a.com", "https://b.com", "https://c.com"]);
    let closed = registry.close_tab(&ids[2]).unwrap();
    assert!(!closed.was_active);
    assert_eq!(closed.index, 2);
    assert_eq!(registry.active_tab_id(), Some(ids[0]));
}

#[rstest]
#[case::first_selects_after(0, 1)]
#[case::middle_selects_after(1, 2)]
#[case::last_falls_back_to_before(2, 1)]
fn test_close_active_tab_selection(#[case] closed: usize, #[case] expected: usize) {
    let (mut registry, ids) = registry_with(&["https://a.com", "https://b.com", "https://c.com"]);
    registry.set_active_tab(&ids[closed]).unwrap();

    let result = registry.close_tab(&ids[closed]).unwrap();

    assert!(result.was_active);
    assert_eq!(result.next_active, Some(ids[expected]));
    assert_eq!(registry.active_tab_id(), Some(ids[expected]));
}

#[test]
fn test_close_sole_tab_clears_selection() {
    let (mut registry, ids) = registry_with(&["https://a.com"]);
    let closed = registry.close_tab(&ids[0]).unwrap();
    assert!(closed.next_active.is_none());
    assert!(registry.is_empty());
    assert!(registry.active_tab_id().is_none());
}

#[test]
fn test_close_all_tabs() {
    let (mut registry, _) = registry_with(&["https://a.com", "https://b.com"]);
    registry.close_all_tabs();
    assert!(registry.is_empty());
    assert!(registry.active_tab_id().is_none());
    assert!(registry.active_tab().is_none());
}

#[test]
fn test_set_active_tab_unknown_id_is_invalid() {
    let (mut registry, ids) = registry_with(&["https://a.com"]);
    let missing = TabId::new();
    assert_eq!(
        registry.set_active_tab(&missing),
        Err(TabError::InvalidTab(missing))
    );
    assert_eq!(registry.active_tab_id(), Some(ids[0]));
}

#[test]
fn test_update_tab_merges_fields() {
    let (mut registry, ids) = registry_with(&["https://a.com"]);

    assert!(registry.update_tab(
        &ids[0],
        TabUpdate {
            url: None,
            thumbnail: Some(common::thumbnail(7)),
        }
    ));
    let tab = registry.get_tab(&ids[0]).unwrap();
    assert_eq!(tab.url, "https://a.com");
    assert_eq!(tab.thumbnail, Some(common::thumbnail(7)));

    assert!(registry.update_tab(&ids[0], TabUpdate::url("https://a.com/next")));
    let tab = registry.get_tab(&ids[0]).unwrap();
    assert_eq!(tab.url, "https://a.com/next");
    assert_eq!(tab.thumbnail, Some(common::thumbnail(7)));
}

#[test]
fn test_update_unknown_tab_is_noop() {
    let (mut registry, _) = registry_with(&["https://a.com"]);
    let before = registry.list();
    assert!(!registry.update_tab(&TabId::new(), TabUpdate::url("https://x.com")));
    assert_eq!(registry.list(), before);
}

#[test]
fn test_restore_keeps_known_active_tab() {
    let tabs = vec![Tab::new("https://a.com"), Tab::new("https://b.com")];
    let active = tabs[1].id;

    let mut registry = TabRegistry::new(HOME);
    registry.restore(tabs.clone(), Some(active));

    assert_eq!(registry.list(), tabs);
    assert_eq!(registry.active_tab_id(), Some(active));
}

#[test]
fn test_restore_falls_back_to_first_tab() {
    let tabs = vec![Tab::new("https://a.com"), Tab::new("https://b.com")];
    let first = tabs[0].id;

    let mut registry = TabRegistry::new(HOME);
    registry.restore(tabs.clone(), Some(TabId::new()));
    assert_eq!(registry.active_tab_id(), Some(first));

    registry.restore(tabs, None);
    assert_eq!(registry.active_tab_id(), Some(first));
}

#[test]
fn test_restore_drops_duplicate_ids() {
    let tab = Tab::new("https://a.com");
    let mut dup = tab.clone();
    dup.url = "https://dup.com".to_string();

    let mut registry = TabRegistry::new(HOME);
    registry.restore(vec![tab.clone(), dup], None);

    assert_eq!(registry.list(), vec![tab]);
}

#[test]
fn test_restore_empty_session() {
    let (mut registry, _) = registry_with(&["https://a.com"]);
    registry.restore(Vec::new(), None);
    assert!(registry.is_empty());
    assert!(registry.active_tab_id().is_none());
}

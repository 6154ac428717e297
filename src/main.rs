//! Wallet browser tabs, headless demo.
//!
//! Drives the tab lifecycle against an in-memory session database and a blank-frame
//! capture service, printing each step.

use walletbrowser::app::App;
use walletbrowser::database::Database;
use walletbrowser::managers::session_manager::SessionStore;
use walletbrowser::managers::tab_registry::TabRegistryTrait;
use walletbrowser::services::screen_capture::BlankFrameCapture;
use walletbrowser::services::settings_engine::SettingsEngine;
use walletbrowser::services::url_input;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    walletbrowser::logging::init()?;

    println!("Wallet browser tabs v{} (demo mode)", env!("CARGO_PKG_VERSION"));
    println!();

    let db = Database::open_in_memory()?;
    let mut app = App::with_database(db, SettingsEngine::new(None), BlankFrameCapture);

    let first = app.startup();
    println!("  Startup selected tab {:?} ({:?})", first, app.tabs.state());

    let dapp = app.tabs.new_tab(Some("https://app.uniswap.org"));
    println!("  Opened {} at {:?}", dapp, app.tabs.current_url());

    if let Some(ticket) = app.tabs.handle_navigation(&dapp, "https://app.uniswap.org/swap") {
        println!("  Snapshot after navigation: {:?}", ticket.outcome().await?);
    }

    if let Some(ticket) = app.tabs.submit_input("uniswap v4 hooks") {
        println!("  Searched from the address bar: {:?}", app.tabs.current_url());
        println!("  Snapshot after search: {:?}", ticket.outcome().await?);
    }

    app.tabs.show_tabs().await;
    println!("  Switcher opened: {:?}", app.tabs.state());
    for tab in app.tabs.registry().lock().list() {
        println!(
            "    {} {} host={} thumbnail={}",
            tab.id,
            tab.url,
            url_input::host(&tab.url).unwrap_or_default(),
            tab.thumbnail.is_some()
        );
    }

    app.tabs.close_tab(&dapp);
    println!("  Closed {}, now at {:?}", dapp, app.tabs.current_url());

    app.shutdown()?;
    println!("  Session saved: {}", app.session_manager.has_session());
    Ok(())
}

// Wallet browser state managers
// Managers own the stateful parts: the tab registry, its lifecycle, and saved sessions.

pub mod session_manager;
pub mod tab_lifecycle;
pub mod tab_registry;

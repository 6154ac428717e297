// Wallet browser services
// Screen capture, debounced snapshotting, settings and address input.

pub mod screen_capture;
pub mod settings_engine;
pub mod snapshot_scheduler;
pub mod url_input;

//! Wallet browser tabs: registry, lifecycle and thumbnail snapshotting for a
//! wallet's in-app browser.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

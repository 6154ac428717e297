//! Shared test doubles.
#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use walletbrowser::services::screen_capture::ScreenCaptureService;
use walletbrowser::types::capture::CaptureOptions;
use walletbrowser::types::errors::CaptureError;
use walletbrowser::types::tab::Thumbnail;

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<CaptureOptions>>,
    failing: AtomicBool,
    frame: AtomicU8,
}

/// Capture service that records every call and returns a one-byte frame whose
/// value increments per capture, or rejects while failing.
#[derive(Clone, Default)]
pub struct RecordingCapture {
    inner: Arc<Inner>,
}

impl RecordingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let capture = Self::default();
        capture.set_failing(true);
        capture
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.lock().len()
    }

    pub fn last_options(&self) -> Option<CaptureOptions> {
        self.inner.calls.lock().last().copied()
    }
}

impl ScreenCaptureService for RecordingCapture {
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> impl Future<Output = Result<Thumbnail, CaptureError>> + Send {
        self.inner.calls.lock().push(options);
        let failing = self.inner.failing.load(Ordering::SeqCst);
        let frame = self.inner.frame.fetch_add(1, Ordering::SeqCst);
        async move {
            if failing {
                return Err(CaptureError::Rejected("surface lost".to_string()));
            }
            Ok(Thumbnail {
                format: options.format,
                width: options.width,
                height: options.height,
                bytes: vec![frame],
            })
        }
    }
}

pub fn thumbnail(byte: u8) -> Thumbnail {
    Thumbnail {
        format: Default::default(),
        width: 1,
        height: 1,
        bytes: vec![byte],
    }
}

//! Screen capture seam.
//!
//! The platform screenshot call is abstracted behind [`ScreenCaptureService`] so the
//! snapshot scheduler can run against the real surface, a headless stand-in, or a test
//! double.

use std::future::Future;

use crate::types::capture::CaptureOptions;
use crate::types::errors::CaptureError;
use crate::types::tab::Thumbnail;

/// Captures the currently displayed page as a thumbnail.
pub trait ScreenCaptureService: Send + Sync + 'static {
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> impl Future<Output = Result<Thumbnail, CaptureError>> + Send;
}

/// Capture service for headless runs: every capture yields an empty frame of the
/// requested size.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankFrameCapture;

impl ScreenCaptureService for BlankFrameCapture {
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> impl Future<Output = Result<Thumbnail, CaptureError>> + Send {
        async move {
            Ok(Thumbnail {
                format: options.format,
                width: options.width,
                height: options.height,
                bytes: Vec::new(),
            })
        }
    }
}

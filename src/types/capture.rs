use serde::{Deserialize, Serialize};

use super::tab::ImageFormat;

/// Parameters handed to the platform screen capture call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CaptureOptions {
    pub format: ImageFormat,
    /// Compression quality in `0.0..=1.0`; ignored for PNG.
    pub quality: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        // Thumbnails are drawn at half the screen width with a phone aspect ratio.
        Self {
            format: ImageFormat::Jpg,
            quality: 0.2,
            width: 200,
            height: 362,
        }
    }
}

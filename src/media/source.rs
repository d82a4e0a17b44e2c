//! Media source resolution.

use std::path::PathBuf;

const AAC_MIME: &str = "audio/aac";
const DEFAULT_MIME: &str = "audio/mp4";

/// A url paired with the content type the element should assume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub url: String,
    pub mime: &'static str,
}

impl MediaSource {
    /// Pick the content type from the url: anything mentioning `aac` is AAC,
    /// everything else is treated as MP4 audio.
    pub fn resolve(url: &str) -> Self {
        let mime = if url.contains("aac") {
            AAC_MIME
        } else {
            DEFAULT_MIME
        };
        Self {
            url: url.to_string(),
            mime,
        }
    }

    /// Local filesystem path for `file://` urls and bare paths.
    pub fn local_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.url.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if self.url.contains("://") {
            return None;
        }
        Some(PathBuf::from(&self.url))
    }
}

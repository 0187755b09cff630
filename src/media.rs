//! Media references handed to the tree by the upload collaborator.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use serde::{Deserialize, Serialize};

/// A playable media resource produced by the host's upload flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Location the renderer can play from (object URL, file path, etc.).
    pub uri: String,
    /// MIME type reported by the host, e.g. `video/mp4`.
    pub mime_type: String,
}

impl MediaRef {
    #[must_use]
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { uri: uri.into(), mime_type: mime_type.into() }
    }

    /// Whether the MIME type's top-level type is `video`.
    ///
    /// Matching is case-insensitive and ignores parameters such as
    /// `; codecs="avc1"`.
    #[must_use]
    pub fn is_video(&self) -> bool {
        let essence = self.mime_type.split(';').next().unwrap_or_default().trim();
        let Some((top, sub)) = essence.split_once('/') else {
            return false;
        };
        top.eq_ignore_ascii_case("video") && !sub.trim().is_empty()
    }
}

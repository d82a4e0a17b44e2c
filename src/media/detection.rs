//! Audio file detection using magic numbers and extension-based fallback.

use std::path::Path;

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// Detected MIME type of a local file and whether it holds audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCheck {
    pub mime: String,
    pub is_audio: bool,
}

/// Sniff `path` and report whether it looks like an audio file.
pub fn check_audio_file(path: &Path) -> Result<AudioCheck> {
    // 1. Magic-number sniffing
    if let Some(kind) = Infer::new().get_from_path(path)? {
        return Ok(AudioCheck {
            mime: kind.mime_type().to_string(),
            // mp4/m4a containers sniff as video
            is_audio: matches!(kind.matcher_type(), MatcherType::Audio | MatcherType::Video),
        });
    }

    // 2. Extension-based lookup
    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();
    let is_audio = mime.starts_with("audio/");
    Ok(AudioCheck { mime, is_audio })
}

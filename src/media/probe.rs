//! Track information lookup using Lofty.

use std::path::Path;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// What the player panel shows about a track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Total track length in seconds.
    pub duration_secs: f64,
    /// Audio properties (bitrate, sample rate, channels)
    pub properties: Vec<(String, String)>,
}

/// Read duration, tags and properties of a local file.
/// Safe to call from a background thread.
pub fn probe_track(path: &Path) -> Result<TrackInfo> {
    let tagged_file = Probe::open(path)?.read()?;

    let (title, artist) = tagged_file
        .primary_tag()
        .map(|tag| {
            (
                tag.title().map(|t| t.to_string()),
                tag.artist().map(|a| a.to_string()),
            )
        })
        .unwrap_or_default();

    let props = tagged_file.properties();
    let mut properties = Vec::new();
    if let Some(b) = props.audio_bitrate() {
        properties.push(("Bitrate (kbps)".into(), b.to_string()));
    }
    if let Some(sr) = props.sample_rate() {
        properties.push(("Sample Rate (Hz)".into(), sr.to_string()));
    }
    if let Some(ch) = props.channels() {
        properties.push(("Channels".into(), ch.to_string()));
    }

    Ok(TrackInfo {
        title,
        artist,
        duration_secs: props.duration().as_secs_f64(),
        properties,
    })
}

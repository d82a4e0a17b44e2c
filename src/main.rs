use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use wavebar::{
    config::load_style,
    logging::init_logging,
    media::{probe_track, TrackInfo},
    ui::{self, Session},
    waveform::WaveformData,
};

/// Play an audio file behind a clickable waveform seek bar.
#[derive(Debug, Parser)]
#[command(name = "wavebar", version, about)]
struct Args {
    /// Audio file to play
    media: PathBuf,

    /// Precomputed peaks, comma or whitespace separated
    #[arg(long, value_name = "FILE")]
    peaks: PathBuf,

    /// Total duration in seconds; probed from the file when omitted
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Style file; defaults to the user config directory
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Container id of the player
    #[arg(long, value_name = "NAME", default_value = "wavebar")]
    id: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;
    tracing::info!("Starting wavebar for {}", args.media.display());

    let style = load_style(args.style.as_deref())?;

    let text = fs::read_to_string(&args.peaks)
        .with_context(|| format!("reading peaks from {}", args.peaks.display()))?;
    let peaks = WaveformData::parse_peaks(&text)?;

    let track = match probe_track(&args.media) {
        Ok(track) => track,
        Err(e) => {
            tracing::warn!("Could not probe {}: {e:#}", args.media.display());
            TrackInfo::default()
        }
    };
    let total_duration = match args.duration {
        Some(secs) => secs,
        None if track.duration_secs > 0.0 => track.duration_secs,
        None => bail!(
            "could not determine the duration of {}, pass --duration",
            args.media.display()
        ),
    };

    ui::run(Session {
        container_id: args.id,
        url: args.media.to_string_lossy().into_owned(),
        total_duration,
        peaks,
        style,
        track,
    })
}

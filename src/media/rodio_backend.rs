//! Media element backed by rodio, for local files.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::detection::check_audio_file;
use super::dispatch::EventDispatcher;
use super::{MediaElement, MediaEvent, MediaEventKind, MediaSource, Subscription};

/// How often a playing element reports its position.
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Commands sent to the audio thread.
enum MediaCommand {
    Load(Option<PathBuf>),
    Play,
    Pause,
    Seek(f64),
    Shutdown,
}

/// Position and length mirrored from the audio thread for quick reads.
#[derive(Debug, Default, Clone, Copy)]
struct Clock {
    position: f64,
    duration: Option<f64>,
}

/// Media element playing local files through the default output device.
///
/// The output stream is owned by a dedicated thread; every call here just
/// queues a command. Lifecycle events are produced by that thread.
pub struct RodioMedia {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<MediaCommand>,
    listeners: Arc<Mutex<EventDispatcher>>,
    clock: Arc<Mutex<Clock>>,
    worker: Option<JoinHandle<()>>,
}

impl RodioMedia {
    /// Spawn the audio thread. No source is loaded yet.
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<MediaCommand>();
        let listeners = Arc::new(Mutex::new(EventDispatcher::new()));
        let clock = Arc::new(Mutex::new(Clock::default()));

        let worker = {
            let listeners = listeners.clone();
            let clock = clock.clone();
            thread::Builder::new()
                .name("wavebar-audio".into())
                .spawn(move || AudioThread::new(listeners, clock).run(cmd_rx))
                .map_err(|e| tracing::error!("Failed to spawn audio thread: {e}"))
                .ok()
        };

        Self {
            cmd_tx,
            listeners,
            clock,
            worker,
        }
    }

    fn send(&self, command: MediaCommand) {
        // The thread only goes away on drop or spawn failure
        let _ = self.cmd_tx.send(command);
    }
}

impl Default for RodioMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for RodioMedia {
    fn load(&mut self, source: &MediaSource) {
        tracing::info!("Loading {} as {}", source.url, source.mime);
        self.send(MediaCommand::Load(source.local_path()));
    }

    fn play(&mut self) {
        self.send(MediaCommand::Play);
    }

    fn pause(&mut self) {
        self.send(MediaCommand::Pause);
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().map(|c| c.position).unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.send(MediaCommand::Seek(seconds));
    }

    fn duration(&self) -> Option<f64> {
        self.clock.lock().ok().and_then(|c| c.duration)
    }

    fn subscribe(&mut self, kind: MediaEventKind, sink: Sender<MediaEvent>) -> Subscription {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.subscribe(kind, sink)
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners
            .lock()
            .map(|mut listeners| listeners.unsubscribe(subscription))
            .unwrap_or(false)
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.send(MediaCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// State owned by the audio thread.
struct AudioThread {
    listeners: Arc<Mutex<EventDispatcher>>,
    clock: Arc<Mutex<Clock>>,
    sink: Option<Sink>,
    playing: bool,
}

impl AudioThread {
    fn new(listeners: Arc<Mutex<EventDispatcher>>, clock: Arc<Mutex<Clock>>) -> Self {
        Self {
            listeners,
            clock,
            sink: None,
            playing: false,
        }
    }

    fn emit(&self, event: MediaEvent) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.emit(event);
        }
    }

    fn run(mut self, rx: Receiver<MediaCommand>) {
        // Try to create the output stream once
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("No audio output available: {e}");
                // Every load fails until the element is dropped
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        MediaCommand::Load(_) => {
                            self.emit(MediaEvent::LoadStart);
                            self.emit(MediaEvent::Abort);
                        }
                        MediaCommand::Shutdown => break,
                        _ => {}
                    }
                }
                return;
            }
        };

        loop {
            match rx.recv_timeout(TIME_UPDATE_INTERVAL) {
                Ok(MediaCommand::Load(path)) => self.load(path, &handle),
                Ok(MediaCommand::Play) => {
                    if let Some(sink) = &self.sink {
                        sink.play();
                        self.playing = true;
                        self.emit(MediaEvent::Play);
                    }
                }
                Ok(MediaCommand::Pause) => {
                    if let Some(sink) = &self.sink {
                        sink.pause();
                        self.playing = false;
                        self.emit(MediaEvent::Pause);
                    }
                }
                Ok(MediaCommand::Seek(seconds)) => self.seek(seconds),
                Ok(MediaCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            if self.playing {
                self.report_progress();
            }
        }

        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        // Keep stream alive until thread exits
        drop(stream);
    }

    fn load(&mut self, path: Option<PathBuf>, handle: &rodio::OutputStreamHandle) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.emit(MediaEvent::LoadStart);

        let Some(path) = path else {
            tracing::warn!("Only local files can be played");
            self.emit(MediaEvent::Abort);
            return;
        };

        match check_audio_file(&path) {
            Ok(check) if check.is_audio => {}
            Ok(check) => {
                tracing::warn!("{} is not audio ({})", path.display(), check.mime);
                self.emit(MediaEvent::Abort);
                return;
            }
            Err(e) => {
                tracing::warn!("Cannot read {}: {e}", path.display());
                self.emit(MediaEvent::Abort);
                return;
            }
        }

        let source = File::open(&path)
            .map_err(anyhow::Error::from)
            .and_then(|file| Decoder::new(BufReader::new(file)).map_err(anyhow::Error::from));
        let source = match source {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Cannot decode {}: {e}", path.display());
                self.emit(MediaEvent::Abort);
                return;
            }
        };

        let duration = source.total_duration().map(|d| d.as_secs_f64());
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("Cannot open output sink: {e}");
                self.emit(MediaEvent::Abort);
                return;
            }
        };
        // Stay paused until asked to play
        sink.pause();
        sink.append(source);
        self.sink = Some(sink);

        if let Ok(mut clock) = self.clock.lock() {
            *clock = Clock {
                position: 0.0,
                duration,
            };
        }
        tracing::debug!("Loaded {} ({duration:?}s)", path.display());
        self.announce_ready();
    }

    fn seek(&mut self, seconds: f64) {
        let Some(sink) = &self.sink else {
            return;
        };
        self.emit(MediaEvent::Waiting);
        if let Err(e) = sink.try_seek(Duration::from_secs_f64(seconds.max(0.0))) {
            tracing::warn!("Seek to {seconds:.2}s failed: {e}");
        }
        self.announce_ready();
    }

    /// Report position and seekable range, then `canplay`.
    fn announce_ready(&self) {
        let Some(sink) = &self.sink else {
            return;
        };
        let position = sink.get_pos().as_secs_f64();
        let duration = self.sync_clock(position);
        for event in ready_events(position, duration) {
            self.emit(event);
        }
    }

    /// Store `position` in the shared clock and return the known duration.
    fn sync_clock(&self, position: f64) -> Option<f64> {
        match self.clock.lock() {
            Ok(mut clock) => {
                clock.position = position;
                clock.duration
            }
            Err(_) => None,
        }
    }

    fn report_progress(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        if self.playing && sink.empty() {
            self.playing = false;
            self.emit(MediaEvent::Pause);
        }

        let position = sink.get_pos().as_secs_f64();
        let duration = self.sync_clock(position);
        self.emit(time_update(position, duration));
    }
}

fn time_update(position: f64, duration: Option<f64>) -> MediaEvent {
    MediaEvent::TimeUpdate {
        current_time: position,
        // local files are seekable end to end
        seekable: duration.unwrap_or(f64::INFINITY),
    }
}

/// Events sent once a source (or a seek target) is playable. The seekable
/// range goes out before `canplay` so the frame drawn on `canplay` sees it.
pub(crate) fn ready_events(position: f64, duration: Option<f64>) -> [MediaEvent; 2] {
    [time_update(position, duration), MediaEvent::CanPlay]
}

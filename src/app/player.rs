//! The waveform player: session state machine, click-to-seek and frame loop.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::config::{Style, StyleConfig};
use crate::error::{ConfigError, InputError, PlayerResult};
use crate::media::{MediaElement, MediaEvent, MediaEventKind, MediaSource, Subscription};
use crate::render::{render_frame, render_loading_pulse, SurfaceSize};
use crate::waveform::WaveformData;

use super::host::Host;
use super::listeners::{ListenerRegistry, PlayerEvent};
use super::session::{PlaybackSession, PlayerState};

/// An embeddable waveform player bound to one container.
///
/// Media events arrive on an internal channel and are applied by
/// [`pump_events`](Self::pump_events); the owner drives
/// [`tick`](Self::tick) once per frame until it returns `Break`.
pub struct WaveformPlayer<H: Host> {
    host: H,
    container_id: String,
    style: Style,
    surface: H::Surface,
    media: Option<H::Media>,
    media_url: Option<String>,
    waveform: Option<WaveformData>,
    session: PlaybackSession,
    listeners: ListenerRegistry,
    subscriptions: Vec<Subscription>,
    events_tx: Sender<MediaEvent>,
    events_rx: Receiver<MediaEvent>,
    alive: bool,
}

impl<H: Host> WaveformPlayer<H> {
    /// Create a player in `container_id`, drawing on a new surface of the
    /// configured size.
    pub fn new(container_id: &str, style: StyleConfig, mut host: H) -> PlayerResult<Self> {
        let container_id = container_id.trim();
        if container_id.is_empty() {
            return Err(ConfigError::MissingContainerId.into());
        }
        let style = style.validate()?;

        let size = SurfaceSize {
            width: style.geometry.width,
            height: style.geometry.height,
        };
        let surface = host.create_surface(&format!("{container_id}-canvas"), size);
        let (events_tx, events_rx) = mpsc::channel();

        tracing::debug!(
            "Player {container_id} created with a {}x{} surface",
            size.width,
            size.height
        );

        Ok(Self {
            host,
            container_id: container_id.to_string(),
            style,
            surface,
            media: None,
            media_url: None,
            waveform: None,
            session: PlaybackSession::new(),
            listeners: ListenerRegistry::new(),
            subscriptions: Vec::new(),
            events_tx,
            events_rx,
            alive: true,
        })
    }

    /// Store backend peaks (dropping the trailing artifact) and redraw.
    pub fn set_waveform_data(&mut self, samples: Vec<i32>) -> PlayerResult<()> {
        let waveform = WaveformData::from_backend(samples)?;
        tracing::debug!("Waveform set with {} samples", waveform.len());
        self.waveform = Some(waveform);
        self.draw();
        Ok(())
    }

    /// Point the player at a media url with a known total duration.
    ///
    /// The media element is created on the first call and reused after.
    pub fn set_media(&mut self, url: &str, total_duration: f64) -> PlayerResult<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(InputError::MissingMediaUrl.into());
        }
        if !total_duration.is_finite() || total_duration <= 0.0 {
            return Err(InputError::InvalidDuration(total_duration).into());
        }

        self.media_url = Some(url.to_string());
        self.session.reset_for_media(total_duration);

        if self.media.is_none() {
            let media = self
                .host
                .create_media(&format!("{}-audio", self.container_id));
            self.media = Some(media);
            self.subscribe_media();
        }

        let source = MediaSource::resolve(url);
        if let Some(media) = self.media.as_mut() {
            media.load(&source);
        }
        Ok(())
    }

    fn subscribe_media(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        for kind in MediaEventKind::ALL {
            let subscription = media.subscribe(kind, self.events_tx.clone());
            self.subscriptions.push(subscription);
        }
    }

    /// Register the handler for `event`, replacing any previous one.
    pub fn listen(&mut self, event: PlayerEvent, handler: impl FnMut() + 'static) {
        self.listeners.listen(event, handler);
    }

    pub fn unlisten(&mut self, event: PlayerEvent) -> bool {
        self.listeners.unlisten(event)
    }

    pub fn play(&mut self) {
        if let Some(media) = self.media.as_mut() {
            media.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(media) = self.media.as_mut() {
            media.pause();
        }
    }

    /// Apply every event delivered since the last call. Returns how many
    /// were applied.
    pub fn pump_events(&mut self) -> usize {
        if !self.alive {
            return 0;
        }
        let pending: Vec<MediaEvent> = self.events_rx.try_iter().collect();
        let count = pending.len();
        for event in pending {
            self.handle_media_event(event);
        }
        count
    }

    /// Run one lifecycle transition.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if !self.alive {
            return;
        }
        tracing::trace!("Media event {event:?} in {:?}", self.session.state());

        match event {
            MediaEvent::LoadStart => self.session.begin_loading(),
            MediaEvent::Waiting => self.session.begin_waiting(),
            MediaEvent::CanPlay => {
                self.session.finish_loading();
                self.draw();
            }
            MediaEvent::Play => {
                self.session.set_playing(true);
                self.listeners.emit(PlayerEvent::Play);
            }
            MediaEvent::Pause => {
                self.session.set_playing(false);
                self.listeners.emit(PlayerEvent::Pause);
            }
            MediaEvent::Abort => {
                tracing::debug!("Media load aborted");
                self.session.abort();
                self.draw();
            }
            MediaEvent::TimeUpdate {
                current_time,
                seekable,
            } => {
                let changed = self.session.update_time(current_time, seekable);
                // the loading pulse owns the surface until canplay
                if changed && !self.session.is_loading() {
                    self.draw();
                }
            }
        }
    }

    /// Seek to the position under a click `offset_x` pixels from the left.
    ///
    /// Targets at or past the seekable frontier back off to one second
    /// before it. Returns the issued seek target, if any.
    pub fn click(&mut self, offset_x: f64) -> Option<f64> {
        if !self.alive {
            return None;
        }
        let total = self.session.total_duration()?;
        let media = self.media.as_mut()?;

        let ratio = offset_x / self.style.geometry.width as f64;
        let requested = ratio * total;
        let seekable = self.session.seekable_duration();
        let target = if requested >= seekable {
            (seekable - 1.0).max(0.0)
        } else {
            requested.max(0.0)
        };

        tracing::debug!("Click at {offset_x:.1}px seeks to {target:.2}s (requested {requested:.2}s)");
        media.set_current_time(target);
        Some(target)
    }

    /// One frame of the scheduling loop.
    pub fn tick(&mut self) -> ControlFlow<()> {
        if !self.alive {
            return ControlFlow::Break(());
        }
        self.session.advance_clock();
        if self.session.is_loading() {
            render_loading_pulse(
                &mut self.surface,
                self.waveform.as_ref(),
                &self.style.geometry,
                self.session.anim_clock(),
                &self.style.palette,
                self.style.exponent,
            );
        }
        ControlFlow::Continue(())
    }

    /// Stop the frame loop and detach from the media element. Idempotent.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;

        if let Some(media) = self.media.as_mut() {
            for subscription in self.subscriptions.drain(..) {
                media.unsubscribe(subscription);
            }
        }
        self.listeners.clear();
        tracing::debug!("Player {} torn down", self.container_id);
    }

    fn draw(&mut self) {
        render_frame(
            &mut self.surface,
            self.waveform.as_ref(),
            &self.style.geometry,
            self.session.progress(),
            &self.style.palette,
            self.style.exponent,
        );
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> PlayerState {
        self.session.state()
    }

    pub fn waveform(&self) -> Option<&WaveformData> {
        self.waveform.as_ref()
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut H::Surface {
        &mut self.surface
    }

    pub fn media(&self) -> Option<&H::Media> {
        self.media.as_ref()
    }
}

impl<H: Host> Drop for WaveformPlayer<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::EventDispatcher;
    use crate::render::{DrawCommand, Paint, RecordingSurface};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Media element that records commands and lets tests fire events.
    #[derive(Default)]
    struct FakeMedia {
        dispatcher: Rc<RefCell<EventDispatcher>>,
        loads: Rc<RefCell<Vec<MediaSource>>>,
        seeks: Rc<RefCell<Vec<f64>>>,
        plays: Rc<Cell<u32>>,
    }

    impl MediaElement for FakeMedia {
        fn load(&mut self, source: &MediaSource) {
            self.loads.borrow_mut().push(source.clone());
        }
        fn play(&mut self) {
            self.plays.set(self.plays.get() + 1);
        }
        fn pause(&mut self) {}
        fn current_time(&self) -> f64 {
            self.seeks.borrow().last().copied().unwrap_or(0.0)
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.seeks.borrow_mut().push(seconds);
        }
        fn duration(&self) -> Option<f64> {
            None
        }
        fn subscribe(&mut self, kind: MediaEventKind, sink: Sender<MediaEvent>) -> Subscription {
            self.dispatcher.borrow_mut().subscribe(kind, sink)
        }
        fn unsubscribe(&mut self, subscription: Subscription) -> bool {
            self.dispatcher.borrow_mut().unsubscribe(subscription)
        }
    }

    /// Host whose media handles stay observable after being moved into
    /// the player.
    #[derive(Default, Clone)]
    struct FakeHost {
        created_media: Rc<Cell<u32>>,
        dispatcher: Rc<RefCell<EventDispatcher>>,
        loads: Rc<RefCell<Vec<MediaSource>>>,
        seeks: Rc<RefCell<Vec<f64>>>,
        plays: Rc<Cell<u32>>,
    }

    impl Host for FakeHost {
        type Surface = RecordingSurface;
        type Media = FakeMedia;

        fn create_surface(&mut self, _element_id: &str, size: SurfaceSize) -> RecordingSurface {
            RecordingSurface::new(size)
        }

        fn create_media(&mut self, _element_id: &str) -> FakeMedia {
            self.created_media.set(self.created_media.get() + 1);
            FakeMedia {
                dispatcher: self.dispatcher.clone(),
                loads: self.loads.clone(),
                seeks: self.seeks.clone(),
                plays: self.plays.clone(),
            }
        }
    }

    fn player() -> (WaveformPlayer<FakeHost>, FakeHost) {
        let host = FakeHost::default();
        let player = WaveformPlayer::new("deck", StyleConfig::default(), host.clone()).unwrap();
        (player, host)
    }

    fn peaks() -> Vec<i32> {
        let mut samples: Vec<i32> = (0..2000).map(|i| (i * 13) % 30000).collect();
        samples.push(0);
        samples
    }

    fn emit(host: &FakeHost, event: MediaEvent) {
        host.dispatcher.borrow_mut().emit(event);
    }

    #[test]
    fn construction_validates_container_and_style() {
        let err = WaveformPlayer::new("  ", StyleConfig::default(), FakeHost::default()).err();
        assert!(matches!(
            err,
            Some(crate::error::PlayerError::Config(ConfigError::MissingContainerId))
        ));

        let style = StyleConfig {
            main_color: "nope".into(),
            ..StyleConfig::default()
        };
        let err = WaveformPlayer::new("deck", style, FakeHost::default()).err();
        assert!(matches!(
            err,
            Some(crate::error::PlayerError::Config(ConfigError::InvalidColor { .. }))
        ));
    }

    #[test]
    fn waveform_round_trip_strips_artifact_and_renders() {
        let (mut player, _host) = player();
        player.set_waveform_data(vec![5, -6, 7, 0]).unwrap();

        assert_eq!(player.waveform().unwrap().samples(), &[5, -6, 7]);
        assert!(matches!(
            player.surface().commands()[0],
            DrawCommand::ClearRect { .. }
        ));
        assert_eq!(player.surface().segments().len(), 361);
    }

    #[test]
    fn empty_waveform_is_an_input_error() {
        let (mut player, _host) = player();
        let err = player.set_waveform_data(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PlayerError::Input(InputError::EmptyWaveform)
        ));
        assert!(player.surface().commands().is_empty());
    }

    #[test]
    fn set_media_validates_and_creates_media_once() {
        let (mut player, host) = player();
        assert!(player.set_media("", 10.0).is_err());
        assert!(player.set_media("song.aac", 0.0).is_err());
        assert!(player.set_media("song.aac", f64::NAN).is_err());
        assert!(player.media().is_none());

        player.set_media("song.aac", 100.0).unwrap();
        player.set_media("next.m4a", 50.0).unwrap();

        assert_eq!(host.created_media.get(), 1);
        assert_eq!(host.dispatcher.borrow().len(), MediaEventKind::ALL.len());
        let loads = host.loads.borrow();
        assert_eq!(loads[0].mime, "audio/aac");
        assert_eq!(loads[1].mime, "audio/mp4");
        assert_eq!(player.session().total_duration(), Some(50.0));
    }

    #[test]
    fn play_and_pause_without_media_are_noops() {
        let (mut player, host) = player();
        player.play();
        player.pause();
        assert_eq!(host.plays.get(), 0);

        player.set_media("song.m4a", 10.0).unwrap();
        player.play();
        assert_eq!(host.plays.get(), 1);
    }

    #[test]
    fn seek_clamps_to_before_the_seekable_edge() {
        let (mut player, host) = player();
        player.set_media("song.m4a", 100.0).unwrap();
        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 0.0,
            seekable: 50.0,
        });

        let target = player.click(700.0).unwrap();
        assert_eq!(target, 49.0);

        let target = player.click(180.0).unwrap();
        assert!((target - 25.0).abs() < 1e-9);
        assert_eq!(host.seeks.borrow().len(), 2);
        // seeking never touches the session directly
        assert_eq!(player.session().time_ratio(), 0.0);
    }

    #[test]
    fn click_exactly_on_the_edge_backs_off() {
        let (mut player, _host) = player();
        player.set_media("song.m4a", 100.0).unwrap();
        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 0.0,
            seekable: 50.0,
        });
        assert_eq!(player.click(360.0), Some(49.0));
    }

    #[test]
    fn click_without_media_does_nothing() {
        let (mut player, _host) = player();
        assert_eq!(player.click(100.0), None);
    }

    #[test]
    fn time_updates_redraw_only_on_change() {
        let (mut player, _host) = player();
        player.set_waveform_data(peaks()).unwrap();
        player.set_media("song.m4a", 100.0).unwrap();
        player.surface_mut().reset();

        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 10.0,
            seekable: 100.0,
        });
        let after_first = player.surface().commands().len();
        assert!(after_first > 0);

        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 10.0,
            seekable: 80.0,
        });
        assert_eq!(player.surface().commands().len(), after_first);
        assert_eq!(player.session().seekable_duration(), 80.0);

        let playhead = player.surface().segments().pop().unwrap();
        assert_eq!(playhead.x1, 72.0);
    }

    #[test]
    fn loading_drives_pulse_until_canplay() {
        let (mut player, host) = player();
        player.set_waveform_data(peaks()).unwrap();
        player.set_media("song.m4a", 100.0).unwrap();

        emit(&host, MediaEvent::LoadStart);
        assert_eq!(player.pump_events(), 1);
        assert_eq!(player.state(), PlayerState::Loading);

        player.surface_mut().reset();
        assert!(player.tick().is_continue());
        let segments = player.surface().segments();
        assert_eq!(segments.len(), 360);
        assert!(segments.iter().all(|s| matches!(s.paint, Paint::Translucent(..))));

        // time updates while loading do not paint over the pulse
        player.surface_mut().reset();
        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 5.0,
            seekable: 100.0,
        });
        assert!(player.surface().commands().is_empty());

        emit(&host, MediaEvent::CanPlay);
        player.pump_events();
        assert_eq!(player.state(), PlayerState::Ready);
        assert!(player.surface().segments().iter().all(|s| matches!(s.paint, Paint::Solid(_))));

        player.surface_mut().reset();
        player.tick();
        assert!(player.surface().commands().is_empty());
    }

    #[test]
    fn rodio_load_sequence_paints_seekable_bars() {
        let (mut player, host) = player();
        player.set_waveform_data(peaks()).unwrap();
        player.set_media("song.m4a", 100.0).unwrap();

        emit(&host, MediaEvent::LoadStart);
        for event in crate::media::rodio_backend::ready_events(0.0, Some(100.0)) {
            emit(&host, event);
        }
        player.pump_events();
        assert_eq!(player.state(), PlayerState::Ready);

        let inactive = Paint::Solid(player.style().palette.inactive);
        let mut segments = player.surface().segments();
        segments.pop();
        assert_eq!(segments.len(), 360);
        assert!(segments.iter().all(|s| s.paint == inactive));
    }

    #[test]
    fn waiting_keeps_position() {
        let (mut player, _host) = player();
        player.set_media("song.m4a", 100.0).unwrap();
        player.handle_media_event(MediaEvent::CanPlay);
        player.handle_media_event(MediaEvent::Play);
        player.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 40.0,
            seekable: 100.0,
        });

        player.handle_media_event(MediaEvent::Waiting);
        assert_eq!(player.state(), PlayerState::Waiting);
        assert_eq!(player.session().time_ratio(), 0.4);

        player.handle_media_event(MediaEvent::CanPlay);
        assert_eq!(player.state(), PlayerState::Playing);
        assert_eq!(player.session().time_ratio(), 0.4);
    }

    #[test]
    fn play_and_pause_are_forwarded_to_listeners() {
        let (mut player, _host) = player();
        let plays = Rc::new(Cell::new(0));
        let pauses = Rc::new(Cell::new(0));

        let counter = plays.clone();
        player.listen(PlayerEvent::Play, move || counter.set(counter.get() + 1));
        player.handle_media_event(MediaEvent::Play);
        player.handle_media_event(MediaEvent::Pause);
        assert_eq!(player.state(), PlayerState::Paused);

        let counter = pauses.clone();
        player.listen(PlayerEvent::Pause, move || counter.set(counter.get() + 1));
        player.handle_media_event(MediaEvent::Pause);

        assert_eq!((plays.get(), pauses.get()), (1, 1));
    }

    #[test]
    fn abort_stops_the_pulse() {
        let (mut player, _host) = player();
        player.set_waveform_data(peaks()).unwrap();
        player.handle_media_event(MediaEvent::LoadStart);
        player.handle_media_event(MediaEvent::Abort);
        assert_eq!(player.state(), PlayerState::Idle);

        player.surface_mut().reset();
        player.tick();
        assert!(player.surface().commands().is_empty());
    }

    #[test]
    fn teardown_detaches_everything_and_halts_ticks() {
        let (mut player, host) = player();
        player.set_waveform_data(peaks()).unwrap();
        player.set_media("song.m4a", 100.0).unwrap();
        emit(&host, MediaEvent::LoadStart);
        player.pump_events();

        player.teardown();
        assert!(!player.is_alive());
        assert!(host.dispatcher.borrow().is_empty());

        player.surface_mut().reset();
        assert!(player.tick().is_break());
        player.handle_media_event(MediaEvent::CanPlay);
        assert_eq!(player.click(10.0), None);
        assert!(player.surface().commands().is_empty());

        // second teardown is harmless
        player.teardown();
    }

    #[test]
    fn drop_unsubscribes() {
        let host = FakeHost::default();
        {
            let mut player = WaveformPlayer::new("deck", StyleConfig::default(), host.clone()).unwrap();
            player.set_media("song.m4a", 10.0).unwrap();
            assert_eq!(host.dispatcher.borrow().len(), 7);
        }
        assert!(host.dispatcher.borrow().is_empty());
    }
}

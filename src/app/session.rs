//! Playback session state owned by the player.

use crate::render::Progress;

/// Amount added to the animation clock on every tick.
pub const ANIM_STEP: f64 = 5.0;

/// Where the media element is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No media loaded yet (or the last load was aborted)
    Idle,
    /// A source is loading
    Loading,
    /// Loaded and not yet played
    Ready,
    Playing,
    Paused,
    /// Buffering mid-playback; the position is kept
    Waiting,
}

/// Mutable playback state. Only the player mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    time_ratio: f64,
    seekable_duration: f64,
    total_duration: Option<f64>,
    state: PlayerState,
    /// State to return to when a `Loading`/`Waiting` phase ends
    resume_state: PlayerState,
    anim_clock: f64,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            time_ratio: 0.0,
            seekable_duration: 0.0,
            total_duration: None,
            state: PlayerState::Idle,
            resume_state: PlayerState::Ready,
            anim_clock: 0.0,
        }
    }

    pub fn time_ratio(&self) -> f64 {
        self.time_ratio
    }

    pub fn seekable_duration(&self) -> f64 {
        self.seekable_duration
    }

    pub fn total_duration(&self) -> Option<f64> {
        self.total_duration
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn anim_clock(&self) -> f64 {
        self.anim_clock
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PlayerState::Loading | PlayerState::Waiting)
    }

    /// Seekable extent as a fraction of the track. Without a known total
    /// duration the whole track counts as seekable.
    pub fn seekable_ratio(&self) -> f64 {
        match self.total_duration {
            Some(total) if total > 0.0 => self.seekable_duration / total,
            _ => 1.0,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            time_ratio: self.time_ratio,
            seekable_ratio: self.seekable_ratio(),
        }
    }

    /// New media: forget position and buffering, keep the clock.
    pub(crate) fn reset_for_media(&mut self, total_duration: f64) {
        self.total_duration = Some(total_duration);
        self.time_ratio = 0.0;
        self.seekable_duration = 0.0;
    }

    pub(crate) fn begin_loading(&mut self) {
        self.state = PlayerState::Loading;
        self.resume_state = PlayerState::Ready;
    }

    pub(crate) fn begin_waiting(&mut self) {
        match self.state {
            PlayerState::Loading | PlayerState::Waiting => {}
            PlayerState::Idle => self.state = PlayerState::Loading,
            current => {
                self.resume_state = current;
                self.state = PlayerState::Waiting;
            }
        }
    }

    /// Leave any loading phase. Returns true if one was active.
    pub(crate) fn finish_loading(&mut self) -> bool {
        if self.is_loading() {
            self.state = self.resume_state;
            true
        } else {
            if self.state == PlayerState::Idle {
                self.state = PlayerState::Ready;
            }
            false
        }
    }

    /// Record a play/pause transition. While loading, it applies once
    /// loading finishes.
    pub(crate) fn set_playing(&mut self, playing: bool) {
        let next = if playing {
            PlayerState::Playing
        } else {
            PlayerState::Paused
        };
        if self.is_loading() {
            self.resume_state = next;
        } else {
            self.state = next;
        }
    }

    pub(crate) fn abort(&mut self) {
        self.state = PlayerState::Idle;
        self.resume_state = PlayerState::Ready;
    }

    /// Apply a time update. Returns true when the time ratio changed.
    pub(crate) fn update_time(&mut self, current_time: f64, seekable: f64) -> bool {
        self.seekable_duration = seekable;

        let Some(total) = self.total_duration.filter(|t| *t > 0.0) else {
            return false;
        };
        let ratio = (current_time / total).clamp(0.0, 1.0);
        if ratio.is_nan() || ratio == self.time_ratio {
            return false;
        }
        self.time_ratio = ratio;
        true
    }

    pub(crate) fn advance_clock(&mut self) {
        self.anim_clock += ANIM_STEP;
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_fully_seekable() {
        let session = PlaybackSession::new();
        assert_eq!(session.state(), PlayerState::Idle);
        assert!(!session.is_loading());
        assert_eq!(session.seekable_ratio(), 1.0);
        assert_eq!(session.time_ratio(), 0.0);
    }

    #[test]
    fn time_updates_report_changes_only() {
        let mut session = PlaybackSession::new();
        session.reset_for_media(100.0);

        assert!(session.update_time(25.0, 60.0));
        assert_eq!(session.time_ratio(), 0.25);
        assert!(!session.update_time(25.0, 70.0));
        assert_eq!(session.seekable_duration(), 70.0);
        assert!((session.seekable_ratio() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn time_ratio_is_clamped() {
        let mut session = PlaybackSession::new();
        session.reset_for_media(10.0);
        assert!(session.update_time(12.0, 10.0));
        assert_eq!(session.time_ratio(), 1.0);
    }

    #[test]
    fn time_update_without_media_keeps_ratio() {
        let mut session = PlaybackSession::new();
        assert!(!session.update_time(5.0, 8.0));
        assert_eq!(session.time_ratio(), 0.0);
        assert_eq!(session.seekable_duration(), 8.0);
    }

    #[test]
    fn waiting_resumes_previous_state() {
        let mut session = PlaybackSession::new();
        session.begin_loading();
        assert!(session.finish_loading());
        assert_eq!(session.state(), PlayerState::Ready);

        session.set_playing(true);
        session.begin_waiting();
        assert_eq!(session.state(), PlayerState::Waiting);
        assert!(session.is_loading());

        // pause arrives mid-buffering
        session.set_playing(false);
        assert_eq!(session.state(), PlayerState::Waiting);
        assert!(session.finish_loading());
        assert_eq!(session.state(), PlayerState::Paused);
    }

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut session = PlaybackSession::new();
        for _ in 0..50 {
            session.advance_clock();
        }
        assert_eq!(session.anim_clock(), 250.0);
    }
}

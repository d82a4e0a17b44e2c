//! Interactive terminal front-end hosting one waveform player.

use std::{
    cell::Cell,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::{
    app::{PlayerEvent, WaveformPlayer},
    config::StyleConfig,
    media::TrackInfo,
};

use super::{
    canvas_surface::WaveformView,
    host::{terminal_player, TerminalHost},
    keybindings::{key_to_action, PlayerAction},
    layout::{click_offset, compute_layout},
    widgets::render_player_panel,
};

/// Frame loop period.
const FRAME_INTERVAL: Duration = Duration::from_millis(30);

const HELP: &str = " space play/pause · click or 0-9 seek · q quit ";

/// Everything needed to start the front-end.
pub struct Session {
    pub container_id: String,
    pub url: String,
    pub total_duration: f64,
    /// Raw backend peaks, trailing artifact included
    pub peaks: Vec<i32>,
    pub style: StyleConfig,
    pub track: TrackInfo,
}

struct App {
    player: WaveformPlayer<TerminalHost>,
    url: String,
    track: TrackInfo,
    /// Mirrored from play/pause listener callbacks
    playing: Rc<Cell<bool>>,
    /// Canvas area of the last frame, for click hit-testing
    waveform_inner: Rect,
}

impl App {
    fn new(session: Session) -> Result<Self> {
        let mut player = terminal_player(&session.container_id, session.style)?;

        let playing = Rc::new(Cell::new(false));
        let flag = playing.clone();
        player.listen(PlayerEvent::Play, move || flag.set(true));
        let flag = playing.clone();
        player.listen(PlayerEvent::Pause, move || flag.set(false));

        player.set_waveform_data(session.peaks)?;
        player.set_media(&session.url, session.total_duration)?;

        Ok(Self {
            player,
            url: session.url,
            track: session.track,
            playing,
            waveform_inner: Rect::default(),
        })
    }

    /// Handle a key press and return true if the app should quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            PlayerAction::TogglePause => {
                if self.playing.get() {
                    self.player.pause();
                } else {
                    self.player.play();
                }
            }
            PlayerAction::JumpTenth(tenth) => {
                let width = self.player.style().geometry.width as f64;
                self.player.click(width * tenth as f64 / 10.0);
            }
            PlayerAction::Quit => return true,
            PlayerAction::None => {}
        }
        false
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let width = self.player.style().geometry.width;
        if let Some(offset_x) = click_offset(self.waveform_inner, mouse.column, mouse.row, width) {
            self.player.click(offset_x);
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());
        let session = self.player.session();

        render_player_panel(
            f,
            layout.info,
            &self.url,
            &self.track,
            session.state(),
            session.time_ratio(),
            session.total_duration().unwrap_or(0.0),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.player.container_id()));
        self.waveform_inner = block.inner(layout.waveform);
        f.render_widget(
            WaveformView::new(self.player.surface()).block(block),
            layout.waveform,
        );

        f.render_widget(
            Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
            layout.help,
        );
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            terminal.draw(|f| self.draw(f))?;
            let timeout = FRAME_INTERVAL
                .checked_sub(last_frame.elapsed())
                .unwrap_or_default();

            if event::poll(timeout)? {
                match event::read()? {
                    CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.on_key(key) {
                            return Ok(());
                        }
                    }
                    CEvent::Mouse(mouse) => self.on_mouse(mouse),
                    _ => {}
                }
            }

            if last_frame.elapsed() >= FRAME_INTERVAL {
                last_frame = Instant::now();
                self.player.pump_events();
                if self.player.tick().is_break() {
                    return Ok(());
                }
            }
        }
    }
}

/// Run the front-end until the user quits.
pub fn run(session: Session) -> Result<()> {
    let mut app = App::new(session)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.event_loop(&mut terminal);
    app.player.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Front-end stopped: {e:#}");
    }
    result
}

//! Player information panel widget.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::PlayerState;
use crate::media::TrackInfo;

/// Format seconds as `mm:ss`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn state_span(state: PlayerState) -> Span<'static> {
    match state {
        PlayerState::Idle => Span::styled(" ⏹ idle ", Style::default().fg(Color::Gray)),
        PlayerState::Loading => Span::styled(" ⏳ loading ", Style::default().fg(Color::Yellow)),
        PlayerState::Waiting => Span::styled(" ⏳ buffering ", Style::default().fg(Color::Yellow)),
        PlayerState::Ready => Span::styled(" ⏵ ready ", Style::default().fg(Color::Cyan)),
        PlayerState::Playing => Span::styled(" ⏸ playing ", Style::default().fg(Color::Green)),
        PlayerState::Paused => Span::styled(" ⏵ paused ", Style::default().fg(Color::Yellow)),
    }
}

/// Render the player information panel.
pub fn render_player_panel(
    f: &mut Frame<'_>,
    area: Rect,
    url: &str,
    track: &TrackInfo,
    state: PlayerState,
    time_ratio: f64,
    total_duration: f64,
) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Player"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        track.title.clone().unwrap_or_else(|| url.to_string()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(artist) = &track.artist {
        lines.push(Line::from(artist.clone()));
    }
    for (k, v) in &track.properties {
        lines.push(Line::from(format!("{}: {}", k, v)));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner[0]);

    let time_label = format!(
        "{} / {}",
        format_clock(time_ratio * total_duration),
        format_clock(total_duration)
    );
    let status = Line::from(vec![
        state_span(state),
        Span::raw("  "),
        Span::styled(time_label, Style::default().fg(Color::Magenta)),
    ]);
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), inner[1]);
}

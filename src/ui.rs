//! UI rendering for the terminal user interface.
//!
//! `draw` renders the whole screen from `App` state and reports where the
//! clickable parts ended up, so mouse input can be mapped back to commands.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::MediaBackend;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlayerStatus, format_time};

const EMPTY_TITLE: &str = "No songs in playlist";
const EMPTY_DETAIL: &str = "Upload music to get started";

/// Screen areas the mouse can act on, as laid out by the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRegions {
    /// Inside of the progress gauge.
    pub progress_bar: Rect,
    /// Inside of the playlist box; row 0 shows track `list_offset`.
    pub playlist: Rect,
    pub list_offset: usize,
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the controls help text, incorporating configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[space] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds),
        "[j/k] move".to_string(),
        "[enter] load".to_string(),
        "[s] save".to_string(),
        "[d] remove".to_string(),
        "[r] repeat".to_string(),
        "[a] add files".to_string(),
        format!("[+/-] volume ±{}", controls.volume_step),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Built-in artwork references render as the configured glyph.
fn artwork_text<'a>(artwork: &'a str, ui: &'a UiSettings) -> &'a str {
    if artwork.starts_with("builtin:") {
        &ui.placeholder_artwork
    } else {
        artwork
    }
}

fn status_text(status: PlayerStatus, pending: bool) -> &'static str {
    match status {
        PlayerStatus::Playing => "Playing",
        _ if pending => "Starting…",
        PlayerStatus::Idle => "Stopped",
        PlayerStatus::Loading => "Loading",
        PlayerStatus::Paused => "Paused",
        PlayerStatus::Error => "Error",
    }
}

/// First visible row so that `cursor` sits near the middle of `height` rows.
fn window_start(total: usize, height: usize, cursor: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let half = height / 2;
    let start = cursor.saturating_sub(half);
    start.min(total - height)
}

/// Render the entire UI into `frame`.
pub fn draw<B: MediaBackend>(frame: &mut Frame, app: &App<B>, ui: &UiSettings) -> ViewRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cantabile ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, app, ui, chunks[1]);

    // Progress
    let player = app.player();
    let total = player.duration().unwrap_or(0.0);
    let label = format!(
        "{} / {}",
        format_time(player.position()),
        format_time(total)
    );
    let gauge_block = Block::bordered().title(" progress ");
    let progress_bar = gauge_block.inner(chunks[2]);
    let gauge = Gauge::default()
        .block(gauge_block)
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(player.progress())
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Status line
    let saved = app.tracks().iter().filter(|t| t.saved).count();
    let status = [
        format!(
            "REPEAT: {}",
            if player.repeat_all() { "All" } else { "Off" }
        ),
        format!("VOLUME: {}%", player.volume()),
        format!("SAVED: {saved}"),
        format!("TRACKS: {}", app.playlist().len()),
    ]
    .join(" • ");
    let status_par = Paragraph::new(status).block(
        Block::bordered()
            .padding(left_pad())
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[3]);

    // Main list
    let list_block = Block::default().borders(Borders::ALL).title(" playlist ");
    let list_area = list_block.inner(chunks[4]);
    let tracks = app.tracks();
    let height = list_area.height as usize;
    let start = window_start(tracks.len(), height, app.cursor());

    if tracks.is_empty() {
        let empty = Paragraph::new(vec![Line::from(EMPTY_TITLE), Line::from(EMPTY_DETAIL.italic())])
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty, chunks[4]);
    } else {
        let end = (start + height).min(tracks.len());
        let current = app.playlist().current();
        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let i = start + offset;
                let marker = if i == current {
                    if player.is_playing() { "▶ " } else { "■ " }
                } else {
                    "  "
                };
                let saved = if track.saved { " ★" } else { "" };
                let text = format!(
                    "{marker}{} - {}{saved}",
                    track.display_title(),
                    track.display_artist()
                );
                if i == current {
                    ListItem::new(text).bold()
                } else {
                    ListItem::new(text)
                }
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(app.cursor().saturating_sub(start)));
        frame.render_stateful_widget(list, chunks[4], &mut state);
    }

    let footer = Paragraph::new(controls_text(app.controls()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    draw_popups(frame, app, chunks[4]);

    ViewRegions {
        progress_bar,
        playlist: list_area,
        list_offset: start,
    }
}

fn draw_now_playing<B: MediaBackend>(frame: &mut Frame, app: &App<B>, ui: &UiSettings, area: Rect) {
    let player = app.player();
    let status = status_text(player.status(), player.is_active());

    let lines: Vec<Line> = if app.playlist().is_empty() {
        vec![Line::from(EMPTY_TITLE.bold()), Line::from(EMPTY_DETAIL)]
    } else if let Some(diag) = player.diagnostic() {
        vec![
            Line::from(diag.headline.bold()),
            Line::from(diag.detail),
            Line::from(status.italic()),
        ]
    } else if let Some(np) = player.now_playing() {
        vec![
            Line::from(np.title.as_str().bold()),
            Line::from(np.artist.as_str()),
            Line::from(format!(
                "{}  {}",
                artwork_text(&np.artwork, ui),
                status
            )),
        ]
    } else {
        vec![Line::from(status)]
    };

    let panel = Paragraph::new(lines)
        .block(Block::bordered().padding(left_pad()).title(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_popups<B: MediaBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    if let Some(notice) = app.notice() {
        let height = notice.lines.len() as u16 + 4;
        let popup = centered_rect_sized(72, height, area);
        frame.render_widget(Clear, popup);
        let mut lines: Vec<Line> = notice.lines.iter().map(|l| Line::from(l.as_str())).collect();
        lines.push(Line::from(""));
        lines.push(Line::from("[enter] ok".italic()));
        let par = Paragraph::new(lines)
            .block(Block::bordered().padding(left_pad()).title(" notice "))
            .wrap(Wrap { trim: true });
        frame.render_widget(par, popup);
    } else if let Some(index) = app.confirm_remove() {
        let popup = centered_rect_sized(60, 5, area);
        frame.render_widget(Clear, popup);
        let title = app
            .playlist()
            .get(index)
            .map(|t| t.display_title())
            .unwrap_or_default();
        let par = Paragraph::new(vec![
            Line::from(format!("Remove \"{title}\" from the playlist?")),
            Line::from("[y] yes  [n] no".italic()),
        ])
        .block(Block::bordered().padding(left_pad()).title(" confirm "))
        .wrap(Wrap { trim: true });
        frame.render_widget(par, popup);
    } else if let Some(text) = app.prompt() {
        let popup = centered_rect_sized(72, 5, area);
        frame.render_widget(Clear, popup);
        let par = Paragraph::new(vec![
            Line::from(format!("{text}_")),
            Line::from("[enter] add  [esc] cancel".italic()),
        ])
        .block(
            Block::bordered()
                .padding(left_pad())
                .title(" add file or directory "),
        );
        frame.render_widget(par, popup);
    }
}

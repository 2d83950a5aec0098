//! Terminal events to `Command`s. Nothing here touches app state; the
//! runtime passes in a snapshot of what the mapping depends on.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::{App, Command, InputMode};
use crate::audio::MediaBackend;
use crate::ui::ViewRegions;

/// Volume change for `Ctrl+Up` / `Ctrl+Down`.
const COARSE_VOLUME_STEP: i32 = 10;

/// What key and mouse mapping needs to know about the app.
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    pub mode: InputMode<'a>,
    pub cursor: usize,
    pub track_count: usize,
    /// A drag-seek gesture is in progress.
    pub seeking: bool,
    pub scrub_seconds: u64,
    pub volume_step: i32,
}

impl<'a> InputContext<'a> {
    pub fn of<B: MediaBackend>(app: &'a App<B>) -> Self {
        Self {
            mode: app.input_mode(),
            cursor: app.cursor(),
            track_count: app.playlist().len(),
            seeking: app.player().is_seeking(),
            scrub_seconds: app.controls().scrub_seconds,
            volume_step: app.controls().volume_step,
        }
    }
}

pub fn map_key(key: KeyEvent, ctx: &InputContext<'_>) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match ctx.mode {
        InputMode::Notice => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Command::DismissNotice),
            _ => None,
        },
        InputMode::Confirm(index) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Command::Remove(index)),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Command::CancelRemove),
            _ => None,
        },
        // Every printable key edits the path, space included.
        InputMode::Prompt(text) => match key.code {
            KeyCode::Enter => Some(Command::Upload(text.to_string())),
            KeyCode::Esc => Some(Command::CancelPrompt),
            KeyCode::Backspace => Some(Command::PromptBackspace),
            KeyCode::Char(c) if !c.is_control() => Some(Command::PromptInput(c)),
            _ => None,
        },
        InputMode::Normal => map_normal_key(key, ctx),
    }
}

fn map_normal_key(key: KeyEvent, ctx: &InputContext<'_>) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let scrub = i64::try_from(ctx.scrub_seconds).unwrap_or(i64::MAX);

    let cmd = match key.code {
        KeyCode::Left if ctrl => Command::Previous,
        KeyCode::Right if ctrl => Command::Next,
        KeyCode::Up if ctrl => Command::VolumeBy(COARSE_VOLUME_STEP),
        KeyCode::Down if ctrl => Command::VolumeBy(-COARSE_VOLUME_STEP),
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char(' ') => Command::TogglePlay,
        KeyCode::Char('h') => Command::Previous,
        KeyCode::Char('l') => Command::Next,
        KeyCode::Char('H') => Command::SeekBy(-scrub),
        KeyCode::Char('L') => Command::SeekBy(scrub),
        KeyCode::Char('j') | KeyCode::Down => Command::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Command::CursorUp,
        KeyCode::Enter if ctx.track_count > 0 => Command::Select(ctx.cursor),
        KeyCode::Char('s') if ctx.track_count > 0 => Command::ToggleSaved(ctx.cursor),
        KeyCode::Char('d') | KeyCode::Delete if ctx.track_count > 0 => {
            Command::RequestRemove(ctx.cursor)
        }
        KeyCode::Char('r') => Command::ToggleRepeat,
        KeyCode::Char('a') => Command::OpenPrompt,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::VolumeBy(ctx.volume_step),
        KeyCode::Char('-') => Command::VolumeBy(-ctx.volume_step),
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Fraction of `bar` at column `x`, clamped to `[0, 1]`.
pub fn bar_fraction(bar: Rect, x: u16) -> f64 {
    if bar.width <= 1 {
        return 0.0;
    }
    let offset = f64::from(x.saturating_sub(bar.x));
    (offset / f64::from(bar.width - 1)).clamp(0.0, 1.0)
}

pub fn map_mouse(
    mouse: MouseEvent,
    regions: &ViewRegions,
    ctx: &InputContext<'_>,
) -> Option<Command> {
    if ctx.mode != InputMode::Normal {
        return None;
    }
    let at = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if regions.progress_bar.contains(at) {
                return Some(Command::SeekPress(bar_fraction(
                    regions.progress_bar,
                    mouse.column,
                )));
            }
            if regions.playlist.contains(at) {
                let row = usize::from(mouse.row - regions.playlist.y) + regions.list_offset;
                if row < ctx.track_count {
                    return Some(Command::Select(row));
                }
            }
            None
        }
        // Once grabbed, the bar follows the pointer anywhere on screen.
        MouseEventKind::Drag(MouseButton::Left) if ctx.seeking => Some(Command::SeekMove(
            bar_fraction(regions.progress_bar, mouse.column),
        )),
        MouseEventKind::Up(MouseButton::Left) if ctx.seeking => Some(Command::SeekRelease),
        MouseEventKind::ScrollUp => Some(Command::CursorUp),
        MouseEventKind::ScrollDown => Some(Command::CursorDown),
        _ => None,
    }
}

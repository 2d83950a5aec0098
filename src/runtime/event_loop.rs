use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::MediaBackend;
use crate::config;
use crate::input::{self, InputContext};
use crate::ui::{self, ViewRegions};

/// How long to wait for terminal input before polling the backend again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: drains backend events, draws, then maps one
/// terminal event to a command. Returns `Ok(())` when the app asks to quit.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut regions = ViewRegions::default();

    loop {
        app.pump(Instant::now());

        terminal.draw(|f| regions = ui::draw(f, app, &settings.ui))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(INPUT_POLL)? {
            let ctx = InputContext::of(app);
            let cmd = match event::read()? {
                Event::Key(key) => input::map_key(key, &ctx),
                Event::Mouse(mouse) => input::map_mouse(mouse, &regions, &ctx),
                _ => None,
            };
            if let Some(cmd) = cmd {
                app.dispatch(cmd, Instant::now());
            }
        }
    }
}

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config;
use crate::state::form::{self, Action, FormState};
use crate::ui::draw;

/// Silences the logger while alive. stderr shares the screen with the form.
struct LogMute {
    previous: LevelFilter,
}

impl LogMute {
    fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        Self { previous }
    }
}

impl Drop for LogMute {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

struct TerminalGuard {
    _mute: LogMute,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mute = LogMute::new();
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self { _mute: mute })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Loads the artifacts and runs the form until the user quits.
///
/// # Errors
/// Returns an error if the artifacts cannot be loaded, or if terminal setup or rendering fails.
pub fn run() -> Result<()> {
    // Loaded before touching the terminal so a missing model is reported on a sane screen.
    let paths = config::artifact_paths();
    let pipeline = regression::load_pipeline(&paths)
        .with_context(|| format!("loading model from '{}'", paths.model.display()))?;
    info!("artifacts loaded, polynomial={}", pipeline.is_polynomial());

    let mut state = FormState::new(pipeline);

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| draw::draw(f, &state))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match form::handle_key(&mut state, k) {
                    Action::Quit => break,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_mute_restores_the_previous_level() {
        log::set_max_level(LevelFilter::Debug);

        {
            let _mute = LogMute::new();
            assert_eq!(log::max_level(), LevelFilter::Off);
        }

        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}

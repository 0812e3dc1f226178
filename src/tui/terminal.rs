//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::config::settings::Settings;
use crate::remote::Directory;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;
use super::remote::Dispatcher;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
///
/// Network requests run on `runtime`; this thread only draws and handles
/// events.
pub fn run_tui(settings: Settings, runtime: Handle, directory: Arc<dyn Directory>) -> Result<()> {
    let mut terminal = init_terminal()?;

    let events = EventHandler::default();
    let dispatcher = Dispatcher::new(runtime, directory, events.sender());
    let mut app = App::new(settings);

    let outcome = event_loop(&mut terminal, &mut app, &events, &dispatcher);

    restore_terminal()?;
    outcome
}

fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    dispatcher: &Dispatcher,
) -> Result<()> {
    loop {
        dispatcher.dispatch_all(app.take_requests());

        terminal.draw(|frame| {
            super::views::render(frame, app);
        })?;

        handle_event(app, events.next()?)?;

        if app.should_quit {
            tracing::info!("leaving TUI");
            return Ok(());
        }
    }
}

//! Event handling for the TUI.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use formcall_commands::Invoker;

use super::app::{App, Message};
use super::ui;

/// Result type for TUI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize the terminal for TUI mode.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI event loop.
pub fn run(invoker: Arc<dyn Invoker>, start_screen: Option<&str>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let mut terminal = setup_terminal()?;
    let mut app = App::new(invoker, runtime.handle().clone());

    if let Some(id) = start_screen {
        if !app.select_screen(id) {
            app.messages.push(Message::system(format!("Unknown screen: {}", id)));
        }
    }

    info!("tui started");
    let result = run_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    info!("tui stopped");

    result
}

/// Main event loop.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        app.poll_settlements();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply one key press to the app.
pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('r') => app.reset_view(),
            KeyCode::Char('l') => {
                app.messages.clear();
                app.messages.push(Message::system("Log cleared"));
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.next_screen(),
        KeyCode::BackTab => app.previous_screen(),
        KeyCode::Up => app.focus_previous_field(),
        KeyCode::Down => app.focus_next_field(),
        KeyCode::Left => app.select_previous_action(),
        KeyCode::Right => app.select_next_action(),
        KeyCode::F(n) if n >= 1 => app.select_action(usize::from(n - 1)),
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}

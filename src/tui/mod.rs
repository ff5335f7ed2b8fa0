// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, redraw ticks, tagline timers)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod document;
pub mod layout;
pub mod scroll;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::content::{Portfolio, TaglineSlot};
use crate::logging::LogBuffer;
use crate::tagline::Fired;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::ComponentId;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop and restores the terminal when
/// done. The tagline rotations and section tracker are torn down before the
/// terminal is released.
pub async fn run_tui(portfolio: Portfolio, config: Config, log_buffer: LogBuffer) -> Result<()> {
    let (timer_tx, mut timer_rx) = mpsc::channel::<(TaglineSlot, Fired)>(64);
    let tick = Duration::from_millis(config.tick_ms);

    // Build state before touching the terminal so errors print normally
    let mut app = App::new(portfolio, config, log_buffer, timer_tx)?;

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.start();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut timer_rx, tick).await;

    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Handles three kinds of events:
/// 1. Keyboard and mouse input
/// 2. Ticks (smooth scroll steps, toast expiry, redraw)
/// 3. Tagline timer notifications
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    timer_rx: &mut mpsc::Receiver<(TaglineSlot, Fired)>,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.on_tick();
            }

            Some((slot, fired)) = timer_rx.recv() => {
                app.on_timer(slot, fired);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Content actions → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    if let KeyCode::Char(c) = key_event.code {
        if app.focused == ComponentId::Page && app.trigger_action(c) {
            return;
        }
    }

    app.dispatch_to_focused(key_event);
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('y') => app.copy_email(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Esc if app.show_logs => app.toggle_logs(),
        KeyCode::Tab => app.next_section(),
        KeyCode::BackTab => app.prev_section(),
        // 1-9 jump straight to a section
        KeyCode::Char(c @ '1'..='9') => {
            app.jump_to_section(c as usize - '1' as usize);
        }
        _ => return false,
    }
    true
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll_focused_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_focused_by(WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            app.click(mouse_event.column, mouse_event.row);
        }
        _ => {}
    }
}

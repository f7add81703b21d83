pub mod app;
pub mod event;
pub mod runner;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;

/// Run the live view until the user quits.
pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(100);
    let mut pending_scan: Option<JoinHandle<()>> = None;

    let outcome = loop {
        // Spawn a scan if requested. A scan still in flight is aborted; any of
        // its updates already queued are rejected by the engine as stale.
        if app.needs_scan {
            if let Some(handle) = pending_scan.take() {
                handle.abort();
            }
            let run = app.begin_scan();
            pending_scan = Some(runner::spawn_paced_scan(
                run,
                app.snapshot.clone(),
                app.pacing.clone(),
                events.sender(),
            ));
        }

        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Scan(scan_event) => {
                app.apply(scan_event);
            }
        }

        // Reset supersedes the running task as well
        if !app.scanner.is_scanning() {
            if let Some(handle) = pending_scan.take() {
                handle.abort();
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    if let Some(handle) = pending_scan.take() {
        handle.abort();
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    if app.verbose && app.stale_updates > 0 {
        eprintln!("Dropped {} stale scan updates", app.stale_updates);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            KeyCode::Char('r') | KeyCode::Enter => app.request_rescan(),
            KeyCode::Char('x') => app.reset(),
            KeyCode::Char('d') => app.toggle_details(),
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

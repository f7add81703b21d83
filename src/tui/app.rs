use crate::config::PacingConfig;
use crate::environment::Snapshot;
use crate::scanner::{RunId, ScanResult, Scanner};
use crate::tui::event::ScanEvent;
use crate::tui::theme::ThemeColors;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub scanner: Scanner,
    pub snapshot: Arc<Snapshot>,
    pub pacing: PacingConfig,
    pub theme: ThemeColors,
    pub source: String,
    pub input_mode: InputMode,
    pub show_details: bool,
    pub flash_message: Option<(String, Instant)>,
    /// Set by keys; the main loop spawns the scan task.
    pub needs_scan: bool,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// Updates dropped because their run had been superseded
    pub stale_updates: usize,
    pub verbose: bool,
}

impl App {
    pub fn new(
        snapshot: Snapshot,
        source: String,
        pacing: PacingConfig,
        theme: ThemeColors,
        verbose: bool,
    ) -> Self {
        Self {
            scanner: Scanner::new(),
            snapshot: Arc::new(snapshot),
            pacing,
            theme,
            source,
            input_mode: InputMode::Normal,
            show_details: true,
            flash_message: None,
            needs_scan: true,
            should_quit: false,
            spinner_frame: 0,
            stale_updates: 0,
            verbose,
        }
    }

    /// Reset the engine for a new run and hand back its id for the scan task.
    pub fn begin_scan(&mut self) -> RunId {
        self.needs_scan = false;
        let run = self.scanner.begin_run();
        if self.verbose {
            crate::buffered_eprintln!("Starting scan {}", run);
        }
        run
    }

    pub fn request_rescan(&mut self) {
        self.needs_scan = true;
        self.show_flash("Rescanning...".to_string());
    }

    pub fn reset(&mut self) {
        self.scanner.reset_scan();
        self.needs_scan = false;
        self.show_flash("Scan reset".to_string());
    }

    /// Feed one progress event to the engine. Returns false if it was stale.
    pub fn apply(&mut self, event: ScanEvent) -> bool {
        let applied = match event {
            ScanEvent::Running { run, id } => self.scanner.mark_running(run, id),
            ScanEvent::Resolved { run, id, outcome } => self.scanner.record(run, id, outcome),
            ScanEvent::Finished { run } => {
                let grade = self.scanner.finish(run).map(|r| (r.grade(), r.total_score, r.max_score));
                match grade {
                    Some((grade, total, max)) => {
                        self.show_flash(format!("Scan complete: grade {} ({}/{})", grade, total, max));
                        true
                    }
                    None => false,
                }
            }
        };

        if !applied {
            self.stale_updates += 1;
            if self.verbose {
                crate::buffered_eprintln!("Dropped stale scan update (current run {})", self.scanner.current_run());
            }
        }
        applied
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.scanner.result()
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Advance the scanning spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

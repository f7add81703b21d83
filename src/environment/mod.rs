pub mod loader;
pub mod snapshot;

pub use loader::{load_snapshot, parse_snapshot, SnapshotFormat};
pub use snapshot::{ConnectionInfo, Display, Location, Snapshot};

/// Read-only view of the environment a scan is evaluated against.
///
/// Every accessor is optional: `None` means the capability could not be
/// observed, which the checks treat as a warning rather than an error.
pub trait Environment {
    fn location(&self) -> Option<&Location>;
    fn cookie_enabled(&self) -> Option<bool>;
    /// `navigator.doNotTrack`
    fn do_not_track(&self) -> Option<&str>;
    /// `window.doNotTrack`, consulted by older engines
    fn window_do_not_track(&self) -> Option<&str>;
    fn webdriver(&self) -> Option<bool>;
    /// Names of globals present on `window`/`document`.
    fn automation_globals(&self) -> &[String];
    fn display(&self) -> Option<&Display>;
    fn connection(&self) -> Option<&ConnectionInfo>;
    fn languages(&self) -> Option<&[String]>;
    fn language(&self) -> Option<&str>;
}

impl Environment for Snapshot {
    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    fn cookie_enabled(&self) -> Option<bool> {
        self.cookie_enabled
    }

    fn do_not_track(&self) -> Option<&str> {
        self.do_not_track.as_deref()
    }

    fn window_do_not_track(&self) -> Option<&str> {
        self.window_do_not_track.as_deref()
    }

    fn webdriver(&self) -> Option<bool> {
        self.webdriver
    }

    fn automation_globals(&self) -> &[String] {
        &self.automation_globals
    }

    fn display(&self) -> Option<&Display> {
        self.display.as_ref()
    }

    fn connection(&self) -> Option<&ConnectionInfo> {
        self.connection.as_ref()
    }

    fn languages(&self) -> Option<&[String]> {
        self.languages.as_deref()
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

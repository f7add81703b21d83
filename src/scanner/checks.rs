use super::catalog::CheckId;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};

/// Terminal status of an evaluated check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Warning,
    Failed,
}

/// Result of evaluating one check. There is no error variant: a missing
/// capability is a warning with a reduced score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub score: u32,
    pub details: String,
}

impl Outcome {
    fn passed(score: u32, details: impl Into<String>) -> Self {
        Self { verdict: Verdict::Passed, score, details: details.into() }
    }

    fn warning(score: u32, details: impl Into<String>) -> Self {
        Self { verdict: Verdict::Warning, score, details: details.into() }
    }

    fn failed(score: u32, details: impl Into<String>) -> Self {
        Self { verdict: Verdict::Failed, score, details: details.into() }
    }
}

/// Globals left behind by headless drivers and automation frameworks.
pub const AUTOMATION_MARKERS: [&str; 6] = [
    "__nightmare",
    "phantom",
    "callPhantom",
    "__selenium_unwrapped",
    "__webdriver_evaluate",
    "__driver_evaluate",
];

const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];
const MIN_COLOR_DEPTH: u32 = 24;

/// Evaluate a single check against the environment.
pub fn evaluate<E: Environment + ?Sized>(id: CheckId, env: &E) -> Outcome {
    match id {
        CheckId::Https => check_https(env),
        CheckId::Cookies => check_cookies(env),
        CheckId::Dnt => check_dnt(env),
        CheckId::Webdriver => check_webdriver(env),
        CheckId::Screen => check_screen(env),
        CheckId::Connection => check_connection(env),
        CheckId::Languages => check_languages(env),
    }
}

fn check_https<E: Environment + ?Sized>(env: &E) -> Outcome {
    let location = env.location();
    let is_https = location.is_some_and(|l| l.protocol == "https:");
    let is_loopback = location.is_some_and(|l| LOOPBACK_HOSTS.contains(&l.hostname.as_str()));

    if is_https {
        Outcome::passed(20, "Connection encrypted via TLS/SSL")
    } else if is_loopback {
        Outcome::warning(15, "Local development environment detected")
    } else {
        Outcome::failed(0, "Connection is NOT encrypted!")
    }
}

fn check_cookies<E: Environment + ?Sized>(env: &E) -> Outcome {
    if env.cookie_enabled() == Some(true) {
        Outcome::passed(15, "Cookies enabled for session management")
    } else {
        Outcome::warning(10, "Cookies disabled - some features may not work")
    }
}

fn check_dnt<E: Environment + ?Sized>(env: &E) -> Outcome {
    let enabled = env.do_not_track() == Some("1") || env.window_do_not_track() == Some("1");
    if enabled {
        Outcome::passed(10, "DNT enabled - privacy conscious user")
    } else {
        Outcome::warning(5, "DNT not enabled - consider enabling for privacy")
    }
}

fn check_webdriver<E: Environment + ?Sized>(env: &E) -> Outcome {
    let is_webdriver = env.webdriver() == Some(true);
    let has_markers = env
        .automation_globals()
        .iter()
        .any(|name| AUTOMATION_MARKERS.contains(&name.as_str()));

    if !is_webdriver && !has_markers {
        Outcome::passed(20, "No automation signatures detected")
    } else {
        Outcome::failed(0, "Automation/Bot signatures detected!")
    }
}

/// Outer window over screen size. A zero screen dimension is implausible.
fn plausible_ratio(window: u32, screen: u32) -> bool {
    if screen == 0 {
        return false;
    }
    let ratio = window as f64 / screen as f64;
    ratio > 0.1 && ratio <= 1.0
}

fn check_screen<E: Environment + ?Sized>(env: &E) -> Outcome {
    let Some(display) = env.display() else {
        return Outcome::warning(5, "Unable to verify display");
    };

    let valid_ratio = plausible_ratio(display.outer_width, display.screen_width)
        && plausible_ratio(display.outer_height, display.screen_height);
    let valid_depth = display.color_depth >= MIN_COLOR_DEPTH;

    if valid_ratio && valid_depth {
        Outcome::passed(
            15,
            format!(
                "Display: {}x{} @ {}bit",
                display.screen_width, display.screen_height, display.color_depth
            ),
        )
    } else if !valid_depth {
        Outcome::warning(8, format!("Unusual color depth: {}bit", display.color_depth))
    } else {
        Outcome::warning(5, "Unusual viewport configuration detected")
    }
}

fn check_connection<E: Environment + ?Sized>(env: &E) -> Outcome {
    match env.connection() {
        Some(connection) => {
            let effective_type = connection.effective_type.as_deref().unwrap_or("unknown");
            let save_data = if connection.save_data == Some(true) {
                " (Data Saver ON)"
            } else {
                ""
            };
            Outcome::passed(10, format!("Connection: {}{}", effective_type, save_data))
        }
        None => Outcome::warning(7, "Connection API not available"),
    }
}

fn check_languages<E: Environment + ?Sized>(env: &E) -> Outcome {
    // Blank entries carry no locale information
    let languages: Vec<&str> = env
        .languages()
        .unwrap_or(&[])
        .iter()
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .collect();
    // Primary locale falls back to the head of the list when `language` is absent
    let primary = env
        .language()
        .filter(|l| !l.is_empty())
        .or_else(|| languages.first().copied());

    match (languages.len(), primary) {
        (n, Some(primary)) if n >= 2 => {
            Outcome::passed(10, format!("Primary: {} ({} configured)", primary, n))
        }
        (_, Some(primary)) => Outcome::warning(7, format!("Single language: {}", primary)),
        (_, None) => Outcome::warning(3, "No language preferences detected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{ConnectionInfo, Display, Location, Snapshot};

    fn at(protocol: &str, hostname: &str) -> Snapshot {
        Snapshot {
            location: Some(Location {
                protocol: protocol.to_string(),
                hostname: hostname.to_string(),
            }),
            ..Snapshot::default()
        }
    }

    fn with_display(outer_width: u32, outer_height: u32, color_depth: u32) -> Snapshot {
        Snapshot {
            display: Some(Display {
                screen_width: 1920,
                screen_height: 1080,
                outer_width,
                outer_height,
                color_depth,
            }),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_https_passed() {
        let outcome = evaluate(CheckId::Https, &at("https:", "example.com"));
        assert_eq!(outcome.verdict, Verdict::Passed);
        assert_eq!(outcome.score, 20);
    }

    #[test]
    fn test_https_loopback_warning() {
        for host in ["localhost", "127.0.0.1"] {
            let outcome = evaluate(CheckId::Https, &at("http:", host));
            assert_eq!(outcome.verdict, Verdict::Warning);
            assert_eq!(outcome.score, 15);
        }
    }

    #[test]
    fn test_https_plaintext_failed() {
        let outcome = evaluate(CheckId::Https, &at("http:", "example.com"));
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_https_unknown_location_failed() {
        let outcome = evaluate(CheckId::Https, &Snapshot::default());
        assert_eq!(outcome.verdict, Verdict::Failed);
    }

    #[test]
    fn test_cookies() {
        let enabled = Snapshot { cookie_enabled: Some(true), ..Snapshot::default() };
        assert_eq!(evaluate(CheckId::Cookies, &enabled).score, 15);

        let disabled = Snapshot { cookie_enabled: Some(false), ..Snapshot::default() };
        let outcome = evaluate(CheckId::Cookies, &disabled);
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 10);

        assert_eq!(evaluate(CheckId::Cookies, &Snapshot::default()).score, 10);
    }

    #[test]
    fn test_dnt_window_fallback() {
        let snapshot = Snapshot {
            window_do_not_track: Some("1".to_string()),
            ..Snapshot::default()
        };
        assert_eq!(evaluate(CheckId::Dnt, &snapshot).verdict, Verdict::Passed);
    }

    #[test]
    fn test_dnt_zero_is_warning() {
        let snapshot = Snapshot { do_not_track: Some("0".to_string()), ..Snapshot::default() };
        let outcome = evaluate(CheckId::Dnt, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 5);
    }

    #[test]
    fn test_webdriver_flag_fails() {
        let snapshot = Snapshot { webdriver: Some(true), ..Snapshot::default() };
        let outcome = evaluate(CheckId::Webdriver, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_webdriver_marker_fails() {
        let snapshot = Snapshot {
            automation_globals: vec!["__selenium_unwrapped".to_string()],
            ..Snapshot::default()
        };
        assert_eq!(evaluate(CheckId::Webdriver, &snapshot).verdict, Verdict::Failed);
    }

    #[test]
    fn test_webdriver_ignores_unrelated_globals() {
        let snapshot = Snapshot {
            automation_globals: vec!["jQuery".to_string(), "Phantom".to_string()],
            ..Snapshot::default()
        };
        let outcome = evaluate(CheckId::Webdriver, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Passed);
        assert_eq!(outcome.score, 20);
    }

    #[test]
    fn test_screen_passed() {
        let outcome = evaluate(CheckId::Screen, &with_display(1280, 900, 24));
        assert_eq!(outcome.verdict, Verdict::Passed);
        assert_eq!(outcome.score, 15);
        assert_eq!(outcome.details, "Display: 1920x1080 @ 24bit");
    }

    #[test]
    fn test_screen_full_size_window_is_plausible() {
        let outcome = evaluate(CheckId::Screen, &with_display(1920, 1080, 30));
        assert_eq!(outcome.verdict, Verdict::Passed);
    }

    #[test]
    fn test_screen_low_color_depth() {
        let outcome = evaluate(CheckId::Screen, &with_display(1280, 900, 16));
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 8);
        assert_eq!(outcome.details, "Unusual color depth: 16bit");
    }

    #[test]
    fn test_screen_low_depth_wins_over_bad_ratio() {
        let outcome = evaluate(CheckId::Screen, &with_display(0, 0, 8));
        assert_eq!(outcome.score, 8);
    }

    #[test]
    fn test_screen_implausible_ratio() {
        // Window larger than the screen
        let outcome = evaluate(CheckId::Screen, &with_display(2560, 900, 24));
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 5);

        // Headless default of a zero-sized window
        let outcome = evaluate(CheckId::Screen, &with_display(0, 0, 24));
        assert_eq!(outcome.score, 5);
    }

    #[test]
    fn test_screen_zero_screen_size() {
        let snapshot = Snapshot {
            display: Some(Display {
                screen_width: 0,
                screen_height: 0,
                outer_width: 800,
                outer_height: 600,
                color_depth: 24,
            }),
            ..Snapshot::default()
        };
        assert_eq!(evaluate(CheckId::Screen, &snapshot).score, 5);
    }

    #[test]
    fn test_screen_unavailable() {
        let outcome = evaluate(CheckId::Screen, &Snapshot::default());
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.details, "Unable to verify display");
    }

    #[test]
    fn test_connection_details() {
        let snapshot = Snapshot {
            connection: Some(ConnectionInfo {
                effective_type: Some("3g".to_string()),
                save_data: Some(true),
            }),
            ..Snapshot::default()
        };
        let outcome = evaluate(CheckId::Connection, &snapshot);
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.details, "Connection: 3g (Data Saver ON)");

        let bare = Snapshot { connection: Some(ConnectionInfo::default()), ..Snapshot::default() };
        assert_eq!(evaluate(CheckId::Connection, &bare).details, "Connection: unknown");
    }

    #[test]
    fn test_connection_unavailable() {
        let outcome = evaluate(CheckId::Connection, &Snapshot::default());
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 7);
    }

    #[test]
    fn test_languages_multiple() {
        let snapshot = Snapshot {
            languages: Some(vec!["en-US".to_string(), "en".to_string()]),
            language: Some("en-US".to_string()),
            ..Snapshot::default()
        };
        let outcome = evaluate(CheckId::Languages, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Passed);
        assert_eq!(outcome.details, "Primary: en-US (2 configured)");
    }

    #[test]
    fn test_languages_single() {
        let snapshot = Snapshot {
            languages: Some(vec!["nl".to_string()]),
            ..Snapshot::default()
        };
        let outcome = evaluate(CheckId::Languages, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 7);
        assert_eq!(outcome.details, "Single language: nl");
    }

    #[test]
    fn test_languages_primary_only() {
        let snapshot = Snapshot { language: Some("ja".to_string()), ..Snapshot::default() };
        assert_eq!(evaluate(CheckId::Languages, &snapshot).score, 7);
    }

    #[test]
    fn test_languages_none() {
        let snapshot = Snapshot { languages: Some(vec![]), ..Snapshot::default() };
        let outcome = evaluate(CheckId::Languages, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 3);
    }

    #[test]
    fn test_languages_blank_primary_is_no_locale() {
        let snapshot = Snapshot { language: Some(String::new()), ..Snapshot::default() };
        let outcome = evaluate(CheckId::Languages, &snapshot);
        assert_eq!(outcome.verdict, Verdict::Warning);
        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.details, "No language preferences detected");
    }

    #[test]
    fn test_languages_blank_entries_ignored() {
        let blanks = Snapshot {
            languages: Some(vec![String::new(), String::new()]),
            ..Snapshot::default()
        };
        assert_eq!(evaluate(CheckId::Languages, &blanks).score, 3);

        let one_real = Snapshot {
            languages: Some(vec![String::new(), "de".to_string()]),
            language: Some(String::new()),
            ..Snapshot::default()
        };
        let outcome = evaluate(CheckId::Languages, &one_real);
        assert_eq!(outcome.score, 7);
        assert_eq!(outcome.details, "Single language: de");
    }

    /// Snapshots reaching every branch of every check, best case first.
    fn branch_snapshots() -> Vec<Snapshot> {
        vec![
            Snapshot::example(),
            Snapshot::default(),
            Snapshot {
                location: Some(Location {
                    protocol: "http:".to_string(),
                    hostname: "localhost".to_string(),
                }),
                cookie_enabled: Some(false),
                do_not_track: Some("0".to_string()),
                automation_globals: vec!["callPhantom".to_string()],
                languages: Some(vec!["fr".to_string()]),
                ..with_display(1280, 900, 16)
            },
            Snapshot {
                location: Some(Location {
                    protocol: "http:".to_string(),
                    hostname: "example.com".to_string(),
                }),
                webdriver: Some(true),
                language: Some("fr".to_string()),
                ..with_display(0, 0, 24)
            },
        ]
    }

    #[test]
    fn test_passed_outscores_warning_outscores_failed() {
        let snapshots = branch_snapshots();
        for id in CheckId::ALL {
            let outcomes: Vec<Outcome> = snapshots.iter().map(|s| evaluate(id, s)).collect();
            let scores = |verdict: Verdict| -> Vec<u32> {
                outcomes
                    .iter()
                    .filter(|o| o.verdict == verdict)
                    .map(|o| o.score)
                    .collect()
            };
            let (passed, warning, failed) =
                (scores(Verdict::Passed), scores(Verdict::Warning), scores(Verdict::Failed));

            assert!(!passed.is_empty(), "{} never passed", id);
            assert!(
                !warning.is_empty() || !failed.is_empty(),
                "{} never degraded",
                id
            );
            for p in &passed {
                assert_eq!(*p, id.max_score(), "{} passed below max", id);
                assert!(warning.iter().chain(&failed).all(|s| s <= p), "{}", id);
            }
            for w in &warning {
                assert!(failed.iter().all(|f| f <= w), "{} failed above warning", id);
            }
            assert!(outcomes.iter().all(|o| o.score <= id.max_score()), "{} over max", id);
        }
    }

    #[test]
    fn test_scores_never_exceed_max() {
        let snapshots = [Snapshot::default(), Snapshot::example(), with_display(0, 0, 8)];
        for snapshot in &snapshots {
            for id in CheckId::ALL {
                assert!(evaluate(id, snapshot).score <= id.max_score(), "{} over max", id);
            }
        }
    }
}

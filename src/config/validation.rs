use super::schema::Config;
use crate::scanner::CheckId;
use std::time::Duration;

const MAX_DELAY: Duration = Duration::from_secs(10);

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = check_delay(&config.pacing.start_delay) {
        errors.push(format!(
            "pacing.start_delay: invalid '{}' - {}",
            config.pacing.start_delay, e
        ));
    }

    for (key, delay) in &config.pacing.checks {
        if let Err(e) = key.parse::<CheckId>() {
            errors.push(format!("pacing.checks.{}: {}", key, e));
        }
        if let Err(e) = check_delay(delay) {
            errors.push(format!("pacing.checks.{}: invalid '{}' - {}", key, delay, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_delay(s: &str) -> Result<(), String> {
    let delay = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if delay > MAX_DELAY {
        return Err(format!("must be at most {}", humantime::format_duration(MAX_DELAY)));
    }
    Ok(())
}

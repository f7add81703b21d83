use super::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Serialization of a snapshot document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }
}

/// Parse a snapshot document.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<Snapshot> {
    let snapshot = match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).context("Failed to parse snapshot: invalid JSON")?
        }
        SnapshotFormat::Yaml => {
            serde_saphyr::from_str(content).context("Failed to parse snapshot: invalid YAML")?
        }
    };
    Ok(snapshot)
}

/// Load a snapshot from a file, or from stdin when `source` is `-`.
///
/// Stdin is always parsed as JSON, which is what a browser console dump
/// produces.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or does not
/// parse as a snapshot.
pub fn load_snapshot(source: &str) -> Result<Snapshot> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read snapshot from stdin")?;
        return parse_snapshot(&content, SnapshotFormat::Json);
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("Snapshot file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file at {}", path.display()))?;

    parse_snapshot(&content, SnapshotFormat::from_path(path))
        .with_context(|| format!("Invalid snapshot in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.JSON")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yaml")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("snapshot")), SnapshotFormat::Yaml);
    }

    #[test]
    fn test_parse_json_snapshot() {
        let json = r#"{"cookie_enabled": true, "languages": ["de-DE", "de", "en"]}"#;
        let snapshot = parse_snapshot(json, SnapshotFormat::Json).unwrap();
        assert_eq!(snapshot.cookie_enabled, Some(true));
        assert_eq!(snapshot.languages.unwrap().len(), 3);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_snapshot("{not json", SnapshotFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_path = env::temp_dir().join("posture_scan_test_missing_snapshot.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_snapshot(temp_path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_yaml_file() {
        let temp_path = env::temp_dir().join("posture_scan_test_snapshot.yaml");
        fs::write(&temp_path, "webdriver: true\nlanguage: fr-FR\n").unwrap();

        let snapshot = load_snapshot(temp_path.to_str().unwrap()).unwrap();
        assert_eq!(snapshot.webdriver, Some(true));
        assert_eq!(snapshot.language.as_deref(), Some("fr-FR"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_json_file() {
        let temp_path = env::temp_dir().join("posture_scan_test_snapshot.json");
        fs::write(&temp_path, r#"{"do_not_track": "1"}"#).unwrap();

        let snapshot = load_snapshot(temp_path.to_str().unwrap()).unwrap();
        assert_eq!(snapshot.do_not_track.as_deref(), Some("1"));

        let _ = fs::remove_file(&temp_path);
    }
}

use serde::{Deserialize, Serialize};

/// A captured description of one browsing environment.
///
/// Every field is optional so that a partial capture still scans. The
/// camelCase property names browsers report (`cookieEnabled`, `colorDepth`)
/// are accepted as aliases.
///
/// Example YAML:
/// ```yaml
/// location:
///   protocol: "https:"
///   hostname: example.com
/// cookie_enabled: true
/// do_not_track: "1"
/// webdriver: false
/// display:
///   screen_width: 1920
///   screen_height: 1080
///   outer_width: 1280
///   outer_height: 900
///   color_depth: 24
/// languages: ["en-US", "en"]
/// language: en-US
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "cookieEnabled")]
    pub cookie_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "doNotTrack")]
    pub do_not_track: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "windowDoNotTrack")]
    pub window_do_not_track: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webdriver: Option<bool>,

    /// Globals found on `window`/`document`, e.g. `callPhantom`
    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "automationGlobals")]
    pub automation_globals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// Includes the trailing colon, as `location.protocol` reports it
    pub protocol: String,
    pub hostname: String,
}

/// Screen and outer window metrics.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Display {
    #[serde(alias = "screenWidth")]
    pub screen_width: u32,
    #[serde(alias = "screenHeight")]
    pub screen_height: u32,
    #[serde(alias = "outerWidth")]
    pub outer_width: u32,
    #[serde(alias = "outerHeight")]
    pub outer_height: u32,
    #[serde(alias = "colorDepth")]
    pub color_depth: u32,
}

/// Network Information API metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConnectionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "effectiveType")]
    pub effective_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "saveData")]
    pub save_data: Option<bool>,
}

impl Snapshot {
    /// A fully populated desktop capture, used by `template`.
    pub fn example() -> Self {
        Self {
            location: Some(Location {
                protocol: "https:".to_string(),
                hostname: "example.com".to_string(),
            }),
            cookie_enabled: Some(true),
            do_not_track: Some("1".to_string()),
            window_do_not_track: None,
            webdriver: Some(false),
            automation_globals: Vec::new(),
            display: Some(Display {
                screen_width: 1920,
                screen_height: 1080,
                outer_width: 1280,
                outer_height: 900,
                color_depth: 24,
            }),
            connection: Some(ConnectionInfo {
                effective_type: Some("4g".to_string()),
                save_data: Some(false),
            }),
            languages: Some(vec!["en-US".to_string(), "en".to_string()]),
            language: Some("en-US".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_parse() {
        let snapshot: Snapshot = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
        assert!(snapshot.automation_globals.is_empty());
    }

    #[test]
    fn test_partial_snapshot_parse() {
        let yaml = r#"
location:
  protocol: "http:"
  hostname: localhost
cookie_enabled: false
automation_globals: ["callPhantom"]
"#;
        let snapshot: Snapshot = serde_saphyr::from_str(yaml).unwrap();
        let location = snapshot.location.unwrap();
        assert_eq!(location.protocol, "http:");
        assert_eq!(location.hostname, "localhost");
        assert_eq!(snapshot.cookie_enabled, Some(false));
        assert_eq!(snapshot.automation_globals, vec!["callPhantom".to_string()]);
        assert!(snapshot.display.is_none());
        assert!(snapshot.languages.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "cookies: true\n";
        assert!(serde_saphyr::from_str::<Snapshot>(yaml).is_err());
    }

    #[test]
    fn test_example_survives_yaml() {
        let example = Snapshot::example();
        let yaml = serde_saphyr::to_string(&example).unwrap();
        let parsed: Snapshot = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(example, parsed);
    }

    #[test]
    fn test_browser_property_names_accepted() {
        let json = r#"{
            "cookieEnabled": true,
            "doNotTrack": "1",
            "automationGlobals": [],
            "display": {
                "screenWidth": 1440,
                "screenHeight": 900,
                "outerWidth": 1440,
                "outerHeight": 860,
                "colorDepth": 30
            },
            "connection": {"effectiveType": "wifi", "saveData": true}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.cookie_enabled, Some(true));
        assert_eq!(snapshot.do_not_track.as_deref(), Some("1"));
        let display = snapshot.display.unwrap();
        assert_eq!(display.screen_width, 1440);
        assert_eq!(display.color_depth, 30);
        let connection = snapshot.connection.unwrap();
        assert_eq!(connection.effective_type.as_deref(), Some("wifi"));
        assert_eq!(connection.save_data, Some(true));
    }

    #[test]
    fn test_connection_without_fields() {
        let json = r#"{"connection": {}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.connection, Some(ConnectionInfo::default()));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of one check in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckId {
    Https,
    Cookies,
    Dnt,
    Webdriver,
    Screen,
    Connection,
    Languages,
}

impl CheckId {
    /// Evaluation order. Fixed; only presentation depends on it.
    pub const ALL: [CheckId; 7] = [
        CheckId::Https,
        CheckId::Cookies,
        CheckId::Dnt,
        CheckId::Webdriver,
        CheckId::Screen,
        CheckId::Connection,
        CheckId::Languages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::Https => "https",
            CheckId::Cookies => "cookies",
            CheckId::Dnt => "dnt",
            CheckId::Webdriver => "webdriver",
            CheckId::Screen => "screen",
            CheckId::Connection => "connection",
            CheckId::Languages => "languages",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CheckId::Https => "HTTPS Connection",
            CheckId::Cookies => "Cookie Security",
            CheckId::Dnt => "Do Not Track",
            CheckId::Webdriver => "Bot Detection",
            CheckId::Screen => "Display Integrity",
            CheckId::Connection => "Connection Type",
            CheckId::Languages => "Locale Integrity",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CheckId::Https => "Verifying encrypted connection",
            CheckId::Cookies => "Checking cookie permissions",
            CheckId::Dnt => "Analyzing privacy preferences",
            CheckId::Webdriver => "Scanning for automation signatures",
            CheckId::Screen => "Validating viewport authenticity",
            CheckId::Connection => "Analyzing network properties",
            CheckId::Languages => "Checking language configuration",
        }
    }

    pub fn max_score(self) -> u32 {
        match self {
            CheckId::Https => 20,
            CheckId::Cookies => 15,
            CheckId::Dnt => 10,
            CheckId::Webdriver => 20,
            CheckId::Screen => 15,
            CheckId::Connection => 10,
            CheckId::Languages => 10,
        }
    }

    /// Position in [`CheckId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("unknown check id '{}'", s))
    }
}

/// Sum of every check's maximum.
pub fn battery_max_score() -> u32 {
    CheckId::ALL.iter().map(|id| id.max_score()).sum()
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade derived from the share of the maximum score achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Lower bounds are inclusive: 90 -> A, 75 -> B, 60 -> C, 40 -> D.
    ///
    /// Compared in integer space so boundary percentages are exact.
    pub fn from_score(total: u32, max: u32) -> Grade {
        if max == 0 {
            return Grade::F;
        }
        let scaled = total as u64 * 100;
        let max = max as u64;
        if scaled >= 90 * max {
            Grade::A
        } else if scaled >= 75 * max {
            Grade::B
        } else if scaled >= 60 * max {
            Grade::C
        } else if scaled >= 40 * max {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// True if `self` is at least as good as `threshold`.
    pub fn meets(self, threshold: Grade) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            _ => anyhow::bail!("grade must be one of A, B, C, D, F: {}", s),
        }
    }
}

/// `total / max * 100`, or 0 for an empty battery.
pub fn percentage(total: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        total as f64 / max as f64 * 100.0
    }
}

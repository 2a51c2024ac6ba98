// Update mode value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the local view learns about service-side changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Re-fetch the full snapshot on a fixed interval.
    Poll,
    /// Keep a server-sent event subscription open.
    #[default]
    Push,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Poll => "poll",
            UpdateMode::Push => "push",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poll" | "polling" => Ok(UpdateMode::Poll),
            "push" | "sse" => Ok(UpdateMode::Push),
            other => Err(format!("unknown update mode '{}', expected poll or push", other)),
        }
    }
}

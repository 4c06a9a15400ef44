use serde::Serialize;

/// Where a session row came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionSource {
    Timer,
    Manual,
    Import,
}

impl SessionSource {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionSource::Timer => "timer",
            SessionSource::Manual => "manual",
            SessionSource::Import => "import",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "timer" => Some(SessionSource::Timer),
            "manual" => Some(SessionSource::Manual),
            "import" => Some(SessionSource::Import),
            _ => None,
        }
    }
}

//! Configuration types for Tidings.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header in TOML still produces a
//! working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
    /// Breakfast demo scenario.
    pub demo: DemoSection,
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate directive overrides (e.g. `tidings_events=trace`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

/// Breakfast demo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    /// Names of the people waiting for breakfast.
    pub people: Vec<String>,
    /// Items announced with `breakfast:ready`.
    pub menu: Vec<String>,
    /// Announce the menu as one argument per item instead of one array.
    pub spread: bool,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            people: vec!["John".to_owned()],
            menu: ["scrambled eggs", "tomatoes", "bread", "butter"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            spread: false,
        }
    }
}

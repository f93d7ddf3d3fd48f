//! Environment-driven settings shared by the loader and the CLI.
//!
//! Every knob has a default so an empty environment is a valid
//! configuration. Lookups go through a closure so tests can supply values
//! without touching the process environment.

use crate::split_list;
use std::env;

pub const LOG_ENV: &str = "MAPSTYLE_LOG";
pub const SKIP_SCHEMA_ENV: &str = "MAPSTYLE_SKIP_SCHEMA";
pub const ALLOWED_SCHEMES_ENV: &str = "MAPSTYLE_ALLOWED_SCHEMES";

const DEFAULT_LOG_FILTER: &str = "warn";
const DEFAULT_SCHEMES: [&str; 3] = ["http", "https", "file"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleConfig {
    /// `tracing-subscriber` filter directive for the CLI.
    pub log_filter: String,
    /// Check fetched documents against the embedded style schema before
    /// typed parsing.
    pub validate_schema: bool,
    /// URL schemes the loader will fetch from.
    pub allowed_schemes: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            validate_schema: true,
            allowed_schemes: DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StyleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }
        if env_flag(lookup(SKIP_SCHEMA_ENV)) {
            config.validate_schema = false;
        }
        if let Some(raw) = lookup(ALLOWED_SCHEMES_ENV) {
            let schemes: Vec<String> = split_list(&raw)
                .into_iter()
                .map(|s| s.to_ascii_lowercase())
                .collect();
            if !schemes.is_empty() {
                config.allowed_schemes = schemes;
            }
        }
        config
    }

    pub fn scheme_allowed(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    }
}

/// Non-empty and not `0` counts as set.
fn env_flag(value: Option<String>) -> bool {
    value
        .map(|v| !v.trim().is_empty() && v.trim() != "0")
        .unwrap_or(false)
}

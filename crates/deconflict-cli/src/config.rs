//! Rule configuration from environment.

use std::env;

use deconflict_core::DeconflictionRules;

pub const ENV_SAFE_DISTANCE: &str = "DECONFLICT_SAFE_DISTANCE";
pub const ENV_TIME_THRESHOLD: &str = "DECONFLICT_TIME_THRESHOLD";
pub const ENV_TIME_STEP: &str = "DECONFLICT_TIME_STEP";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub rules: DeconflictionRules,
}

impl Config {
    /// Environment over built-in defaults.
    pub fn from_env() -> Self {
        Self::from_env_with_base(DeconflictionRules::default())
    }

    /// Environment over `base` (e.g. a rules file).
    pub fn from_env_with_base(base: DeconflictionRules) -> Self {
        Self::from_lookup(base, |key| env::var(key).ok())
    }

    fn from_lookup(base: DeconflictionRules, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, fallback: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(fallback)
        };
        Self {
            rules: DeconflictionRules {
                safe_distance: read(ENV_SAFE_DISTANCE, base.safe_distance),
                time_threshold: read(ENV_TIME_THRESHOLD, base.time_threshold),
                time_step: read(ENV_TIME_STEP, base.time_step),
            },
        }
    }

    /// Apply command-line overrides, which take precedence over everything.
    pub fn with_overrides(
        mut self,
        safe_distance: Option<f64>,
        time_threshold: Option<f64>,
        time_step: Option<f64>,
    ) -> Self {
        if let Some(value) = safe_distance {
            self.rules.safe_distance = value;
        }
        if let Some(value) = time_threshold {
            self.rules.time_threshold = value;
        }
        if let Some(value) = time_step {
            self.rules.time_step = value;
        }
        self
    }
}

use std::time::Duration;

use mlboard_core::endpoints::DEFAULT_ROC_POINTS;

/// Default base URL of the ML API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Record count of the bundled NSL-KDD training set; used for the local
/// split preview until the API reports otherwise.
pub const DEFAULT_DATASET_SIZE: u64 = 125_973;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    /// `n_points` requested from the ROC endpoint.
    pub roc_points: u32,
    pub dataset_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            roc_points: DEFAULT_ROC_POINTS,
            dataset_size: DEFAULT_DATASET_SIZE,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `ML_API_URL`          | `http://localhost:8000` |
    /// | `ML_API_TIMEOUT_SECS` | `30`                    |
    /// | `ROC_POINTS`          | `100`                   |
    /// | `DATASET_SIZE`        | `125973`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("ML_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let timeout_secs: u64 = parse_var(&lookup, "ML_API_TIMEOUT_SECS", "u64")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            roc_points: parse_var(&lookup, "ROC_POINTS", "u32")?.unwrap_or(defaults.roc_points),
            dataset_size: parse_var(&lookup, "DATASET_SIZE", "u64")?
                .unwrap_or(defaults.dataset_size),
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var,
                expected,
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.roc_points, 100);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ML_API_URL", "http://ml:9000/"),
            ("ML_API_TIMEOUT_SECS", "5"),
            ("ROC_POINTS", "50"),
            ("DATASET_SIZE", "1000"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://ml:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.roc_points, 50);
        assert_eq!(config.dataset_size, 1000);
    }

    #[test]
    fn invalid_number_is_an_error() {
        let result = ClientConfig::from_lookup(lookup(&[("ROC_POINTS", "many")]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "ROC_POINTS", .. }));
    }
}

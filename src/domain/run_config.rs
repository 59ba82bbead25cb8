//! Run configuration: where to fetch from, where to write, which windows.
//!
//! Every key is optional. Missing keys fall back to the defaults below;
//! present but invalid values are rejected.

use crate::domain::error::MarketPerfError;
use crate::domain::window::{standard_windows, Lookback, Window};
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "data/market_data.csv";
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DATA_DIR: &str = "data/history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub data_dir: PathBuf,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub output_path: PathBuf,
    pub provider: ProviderConfig,
    pub parallel: bool,
    pub windows: Vec<Window>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            provider: ProviderConfig::default(),
            parallel: false,
            windows: standard_windows(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> MarketPerfError {
    MarketPerfError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

impl RunConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, MarketPerfError> {
        let defaults = Self::default();

        let output_path = config
            .get_string("output", "path")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let kind = match config.get_string("provider", "kind") {
            None => ProviderKind::Yahoo,
            Some(k) => match k.trim().to_lowercase().as_str() {
                "yahoo" => ProviderKind::Yahoo,
                "csv" => ProviderKind::Csv,
                other => {
                    return Err(invalid(
                        "provider",
                        "kind",
                        format!("unknown provider '{other}' (expected yahoo or csv)"),
                    ));
                }
            },
        };

        let timeout_secs = match config.get_string("provider", "timeout_secs") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "provider",
                        "timeout_secs",
                        format!("expected a positive number of seconds, got '{}'", raw.trim()),
                    ));
                }
            },
        };

        let parallel = match config.get_string("run", "parallel") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid(
                    "run",
                    "parallel",
                    format!("expected true or false, got '{}'", raw.trim()),
                )
            })?,
        };

        let provider = ProviderConfig {
            kind,
            base_url: config
                .get_string("provider", "base_url")
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.provider.base_url),
            user_agent: config
                .get_string("provider", "user_agent")
                .unwrap_or(defaults.provider.user_agent),
            timeout_secs,
            data_dir: config
                .get_string("provider", "data_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.provider.data_dir),
        };

        let windows = match config.get_string("windows", "set") {
            Some(s) => parse_windows(&s)?,
            None => defaults.windows,
        };

        Ok(Self {
            output_path,
            provider,
            parallel,
            windows,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse `1D:0, 1W:7, ...` into windows, in the order given.
pub fn parse_windows(input: &str) -> Result<Vec<Window>, MarketPerfError> {
    let mut windows = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let token = token.trim();
        let Some((label, days)) = token.split_once(':') else {
            return Err(invalid(
                "windows",
                "set",
                format!("expected LABEL:DAYS, got '{token}'"),
            ));
        };
        let label = label.trim();
        if label.is_empty() {
            return Err(invalid("windows", "set", "empty window label"));
        }
        let days: u32 = days.trim().parse().map_err(|_| {
            invalid(
                "windows",
                "set",
                format!("days for {label} must be a non-negative integer"),
            )
        })?;
        if !seen.insert(label.to_string()) {
            return Err(invalid("windows", "set", format!("duplicate window {label}")));
        }
        windows.push(Window::new(label, Lookback::from_days(days)));
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn empty_config_gives_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let config = RunConfig::from_config(&adapter).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.output_path, PathBuf::from("data/market_data.csv"));
        assert_eq!(config.windows.len(), 8);
    }

    #[test]
    fn reads_all_sections() {
        let ini = r#"
[output]
path = out/perf.csv

[provider]
kind = csv
data_dir = fixtures
timeout_secs = 5
base_url = http://localhost:8080/

[run]
parallel = yes

[windows]
set = 1D:0, 1M:30
"#;
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let config = RunConfig::from_config(&adapter).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/perf.csv"));
        assert_eq!(config.provider.kind, ProviderKind::Csv);
        assert_eq!(config.provider.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert!(config.parallel);
        assert_eq!(
            config.windows,
            vec![
                Window::new("1D", Lookback::PreviousObservation),
                Window::new("1M", Lookback::CalendarDays(30)),
            ]
        );
    }

    #[test]
    fn unknown_provider_rejected() {
        let adapter = FileConfigAdapter::from_string("[provider]\nkind = bloomberg\n").unwrap();
        let err = RunConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(err, MarketPerfError::ConfigInvalid { key, .. } if key == "kind"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let adapter = FileConfigAdapter::from_string("[provider]\ntimeout_secs = 0\n").unwrap();
        let err = RunConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(err, MarketPerfError::ConfigInvalid { key, .. } if key == "timeout_secs"));
    }

    #[test]
    fn non_numeric_timeout_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[provider]\ntimeout_secs = soon\n").unwrap();
        let err = RunConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            MarketPerfError::ConfigInvalid { section, key, .. }
                if section == "provider" && key == "timeout_secs"
        ));
    }

    #[test]
    fn negative_timeout_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[provider]\ntimeout_secs = -5\n").unwrap();
        assert!(RunConfig::from_config(&adapter).is_err());
    }

    #[test]
    fn unrecognised_parallel_flag_rejected() {
        let adapter = FileConfigAdapter::from_string("[run]\nparallel = maybe\n").unwrap();
        let err = RunConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            MarketPerfError::ConfigInvalid { section, key, .. }
                if section == "run" && key == "parallel"
        ));
    }

    #[test]
    fn parallel_accepts_common_spellings() {
        let cases = [
            ("true", true),
            ("Yes", true),
            ("on", true),
            ("1", true),
            ("no", false),
            ("OFF", false),
            ("0", false),
        ];
        for (raw, want) in cases {
            let ini = format!("[run]\nparallel = {raw}\n");
            let adapter = FileConfigAdapter::from_string(&ini).unwrap();
            assert_eq!(RunConfig::from_config(&adapter).unwrap().parallel, want, "{raw}");
        }
    }

    #[test]
    fn parse_windows_rejects_negative_days() {
        assert!(parse_windows("1W:-7").is_err());
    }

    #[test]
    fn parse_windows_rejects_duplicates() {
        let err = parse_windows("1W:7, 1W:8").unwrap_err();
        assert!(err.to_string().contains("duplicate window 1W"));
    }

    #[test]
    fn parse_windows_rejects_missing_separator() {
        assert!(parse_windows("1W").is_err());
        assert!(parse_windows("1W:7,").is_err());
    }
}

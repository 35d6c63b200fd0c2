use std::{env, path::PathBuf, str::FromStr};

use crate::corpus::SAMPLE_MESSAGES;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, DirectoryConfig, LoggingConfig, ReportFormat,
    SplitConfig, VectorizerConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_source(|key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the config from any key lookup; `load_config` passes the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let corpus_path = var("CORPUS_PATH").map(PathBuf::from);

        let split = SplitConfig {
            test_ratio: parse_or(&var, "TEST_RATIO", 0.2)?,
            seed: parse_or(&var, "SPLIT_SEED", 42)?,
        };
        if !(split.test_ratio > 0.0 && split.test_ratio < 1.0) {
            return Err(invalid("TEST_RATIO", split.test_ratio, "must be between 0 and 1"));
        }

        let vectorizer = VectorizerConfig {
            min_df: parse_or(&var, "MIN_DF", 1)?,
            remove_stop_words: match var("REMOVE_STOP_WORDS") {
                Some(value) => parse_bool(&value)
                    .ok_or_else(|| invalid("REMOVE_STOP_WORDS", value, "expected a boolean"))?,
                None => true,
            },
        };
        if vectorizer.min_df == 0 {
            return Err(invalid("MIN_DF", 0, "must be at least 1"));
        }

        let classifier = ClassifierConfig {
            alpha: parse_or(&var, "NB_ALPHA", 1.0)?,
        };
        if !(classifier.alpha.is_finite() && classifier.alpha > 0.0) {
            return Err(invalid("NB_ALPHA", classifier.alpha, "must be positive"));
        }

        let inference_messages = var("INFERENCE_MESSAGES")
            .map(|value| {
                value
                    .split(';')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| SAMPLE_MESSAGES.iter().map(|m| m.to_string()).collect());

        let report_format = match var("REPORT_FORMAT").as_deref() {
            None | Some("text") => ReportFormat::Text,
            Some("json") => ReportFormat::Json,
            Some(other) => return Err(invalid("REPORT_FORMAT", other, "expected text or json")),
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            reports_dir: var("REPORTS_DIR").unwrap_or_else(|| "reports".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            corpus_path,
            split,
            vectorizer,
            classifier,
            inference_messages,
            report_format,
            directories,
            logging,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| invalid(key, value, "could not be parsed")),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub corpus_path: Option<PathBuf>,
    pub split: SplitConfig,
    pub vectorizer: VectorizerConfig,
    pub classifier: ClassifierConfig,
    pub inference_messages: Vec<String>,
    pub report_format: ReportFormat,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    pub test_ratio: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct VectorizerConfig {
    pub min_df: usize,
    pub remove_stop_words: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub reports_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

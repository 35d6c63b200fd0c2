use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

pub const REPORT_FILENAME: &str = "report.json";

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub report_path: PathBuf,
}

/// Creates missing directories; existing ones are used as they are.
pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;
    let reports_dir = ensure_dir(&cfg.reports_dir)?;
    let report_path = reports_dir.join(REPORT_FILENAME);

    let probe_file = reports_dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("reports directory {} is not writable", reports_dir.display()))?;
    fs::remove_file(&probe_file)?;
    Ok(ResolvedPaths {
        logs_dir,
        report_path,
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}

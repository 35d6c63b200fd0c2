use std::{fs, path::Path};

use thiserror::Error;

use crate::domain::{Label, Record};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected `label<TAB>text`")]
    Malformed { line: usize },
    #[error("line {line}: {source}")]
    Label {
        line: usize,
        #[source]
        source: crate::domain::record::UnknownLabel,
    },
    #[error("corpus file {0} contains no records")]
    Empty(String),
}

pub fn load_tsv(path: &Path) -> Result<Vec<Record>, CorpusError> {
    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_tsv(&raw)?;
    if records.is_empty() {
        return Err(CorpusError::Empty(path.display().to_string()));
    }
    tracing::info!(
        target: "corpus",
        path = %path.display(),
        records = records.len(),
        "corpus file loaded"
    );
    Ok(records)
}

pub fn parse_tsv(raw: &str) -> Result<Vec<Record>, CorpusError> {
    let mut records = Vec::new();
    let mut seen_data_line = false;
    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (label, text) = line
            .split_once('\t')
            .ok_or(CorpusError::Malformed { line: line_no })?;
        let is_first = !seen_data_line;
        seen_data_line = true;
        if is_first && label.trim().eq_ignore_ascii_case("label") {
            continue;
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(CorpusError::Malformed { line: line_no });
        }
        let label = label
            .parse::<Label>()
            .map_err(|source| CorpusError::Label {
                line: line_no,
                source,
            })?;
        records.push(Record::new(label, text));
    }
    Ok(records)
}

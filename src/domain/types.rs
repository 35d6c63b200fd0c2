use serde::Serialize;

use super::record::{Label, Record};

/// Dense TF-IDF row, one weight per vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentVector {
    values: Vec<f64>,
}

impl DocumentVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[cfg(test)]
    pub fn zeros(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[cfg(test)]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Non-zero `(index, weight)` pairs in index order.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, weight)| *weight != 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub total: usize,
    pub ham: usize,
    pub spam: usize,
}

impl CorpusSummary {
    pub fn from_records(records: &[Record]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.total += 1;
            match record.label {
                Label::Ham => acc.ham += 1,
                Label::Spam => acc.spam += 1,
            }
            acc
        })
    }
}

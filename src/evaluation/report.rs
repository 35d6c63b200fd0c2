use serde::Serialize;

use crate::domain::{CorpusSummary, Label};

use super::metrics::Metrics;

/// Four scalar metrics at fixed 4-decimal precision.
pub fn report(metrics: &Metrics) -> String {
    format!(
        "Accuracy:  {:.4}\nPrecision: {}\nRecall:    {}\nF1 Score:  {:.4}\n",
        metrics.accuracy,
        optional(metrics.precision),
        optional(metrics.recall),
        metrics.f1
    )
}

fn optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.4}"),
        None => format!("{:.4} (undefined)", 0.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestPrediction {
    pub text: String,
    pub actual: Label,
    pub predicted: Label,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceResult {
    pub text: String,
    pub label: Label,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub corpus: CorpusSummary,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
    pub metrics: Metrics,
    pub test_predictions: Vec<TestPrediction>,
    pub inference: Vec<InferenceResult>,
}

impl RunReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Dataset ===\n");
        out.push_str(&format!("Records: {}\n", self.corpus.total));
        out.push_str(&format!("  ham:  {}\n", self.corpus.ham));
        out.push_str(&format!("  spam: {}\n", self.corpus.spam));
        out.push_str(&format!(
            "Train/test split: {}/{}\n",
            self.train_size, self.test_size
        ));
        out.push_str(&format!("Vocabulary size: {}\n", self.vocabulary_size));
        out.push_str(&format!(
            "Train matrix: {} x {}\n",
            self.train_shape.0, self.train_shape.1
        ));
        out.push_str(&format!(
            "Test matrix:  {} x {}\n",
            self.test_shape.0, self.test_shape.1
        ));

        out.push_str("\n=== Evaluation ===\n");
        out.push_str(&report(&self.metrics));

        out.push_str("\nConfusion matrix (rows: actual, cols: predicted)\n");
        out.push_str(&format!("{:>8}{:>8}{:>8}\n", "", "ham", "spam"));
        for (label, row) in Label::ALL.iter().zip(self.metrics.confusion.grid()) {
            out.push_str(&format!(
                "{:>8}{:>8}{:>8}\n",
                label.as_str(),
                row[0],
                row[1]
            ));
        }

        out.push_str("\n=== Held-out predictions ===\n");
        for prediction in &self.test_predictions {
            out.push_str(&format!(
                "[{} -> {} ({:.4})] {}\n",
                prediction.actual, prediction.predicted, prediction.confidence, prediction.text
            ));
        }

        out.push_str("\n=== New messages ===\n");
        for result in &self.inference {
            out.push_str(&format!("{} => {}\n", result.text, result.label));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

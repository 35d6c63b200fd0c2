mod metrics;
mod report;

pub use metrics::score;
#[cfg(test)]
pub use report::report;
pub use report::{InferenceResult, RunReport, TestPrediction};

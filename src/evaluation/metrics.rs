use serde::Serialize;

use crate::{
    domain::Label,
    error::{PipelineError, PipelineResult},
};

/// Binary outcome counts with spam as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_ham: usize,
    pub false_spam: usize,
    pub false_ham: usize,
    pub true_spam: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Ham, Label::Ham) => self.true_ham += 1,
            (Label::Ham, Label::Spam) => self.false_spam += 1,
            (Label::Spam, Label::Ham) => self.false_ham += 1,
            (Label::Spam, Label::Spam) => self.true_spam += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_ham + self.false_spam + self.false_ham + self.true_spam
    }

    /// Rows are actual labels, columns predicted labels, both in `Label::ALL` order.
    pub fn grid(&self) -> [[usize; 2]; 2] {
        [
            [self.true_ham, self.false_spam],
            [self.false_ham, self.true_spam],
        ]
    }
}

/// `precision` and `recall` are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

pub fn score(y_true: &[Label], y_pred: &[Label]) -> PipelineResult<Metrics> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::InputShape {
            what: "predicted labels",
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(PipelineError::config("cannot score an empty prediction set"));
    }

    let mut confusion = ConfusionMatrix::default();
    for (actual, predicted) in y_true.iter().zip(y_pred) {
        confusion.record(*actual, *predicted);
    }

    let accuracy = (confusion.true_ham + confusion.true_spam) as f64 / confusion.total() as f64;
    let precision = ratio(confusion.true_spam, confusion.true_spam + confusion.false_spam);
    let recall = ratio(confusion.true_spam, confusion.true_spam + confusion.false_ham);
    let (p, r) = (precision.unwrap_or(0.0), recall.unwrap_or(0.0));
    let f1 = if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) };

    tracing::debug!(
        target: "evaluation",
        samples = confusion.total(),
        accuracy,
        f1,
        "predictions scored"
    );

    Ok(Metrics {
        accuracy,
        precision,
        recall,
        f1,
        confusion,
    })
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Ham, Spam};

    const EPS: f64 = 1e-12;

    #[test]
    fn counts_every_outcome() {
        let y_true = [Ham, Ham, Spam, Spam, Spam];
        let y_pred = [Ham, Spam, Ham, Spam, Spam];
        let metrics = score(&y_true, &y_pred).unwrap();
        assert_eq!(
            metrics.confusion,
            ConfusionMatrix {
                true_ham: 1,
                false_spam: 1,
                false_ham: 1,
                true_spam: 2,
            }
        );
        assert_eq!(metrics.confusion.grid(), [[1, 1], [1, 2]]);
        assert!((metrics.accuracy - 0.6).abs() < EPS);
        assert!((metrics.precision.unwrap() - 2.0 / 3.0).abs() < EPS);
        assert!((metrics.recall.unwrap() - 2.0 / 3.0).abs() < EPS);
        assert!((metrics.f1 - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn no_positive_predictions_leaves_precision_undefined() {
        let metrics = score(&[Ham, Spam], &[Ham, Ham]).unwrap();
        assert_eq!(metrics.precision, None);
        assert_eq!(metrics.recall, Some(0.0));
        assert_eq!(metrics.f1, 0.0);
    }

    #[test]
    fn all_ham_leaves_recall_undefined() {
        let metrics = score(&[Ham, Ham, Ham], &[Ham, Ham, Ham]).unwrap();
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.precision, None);
        assert_eq!(metrics.recall, None);
        assert_eq!(metrics.f1, 0.0);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let labels = [Ham, Spam];
        for a in labels {
            for b in labels {
                for c in labels {
                    for d in labels {
                        let metrics = score(&[a, b], &[c, d]).unwrap();
                        assert_eq!(metrics.confusion.total(), 2);
                        let scalars = [
                            Some(metrics.accuracy),
                            metrics.precision,
                            metrics.recall,
                            Some(metrics.f1),
                        ];
                        for value in scalars.into_iter().flatten() {
                            assert!((0.0..=1.0).contains(&value));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_mismatched_or_empty_input() {
        assert!(matches!(
            score(&[Ham], &[Ham, Spam]),
            Err(PipelineError::InputShape { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(score(&[], &[]), Err(PipelineError::Configuration(_))));
    }
}

use serde::Serialize;

use crate::{
    domain::{DocumentVector, Label, Prediction},
    error::{PipelineError, PipelineResult},
};

pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted state, stored in log space. Indexed by `Label::index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParameters {
    pub class_log_prior: [f64; 2],
    pub feature_log_prob: [Vec<f64>; 2],
}

impl ModelParameters {
    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }
}

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    alpha: f64,
    params: Option<ModelParameters>,
}

impl MultinomialNb {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            params: None,
        }
    }

    #[cfg(test)]
    pub fn parameters(&self) -> Option<&ModelParameters> {
        self.params.as_ref()
    }

    pub fn fit(&mut self, x: &[DocumentVector], y: &[Label]) -> PipelineResult<&ModelParameters> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(PipelineError::config(format!(
                "smoothing alpha must be positive, got {}",
                self.alpha
            )));
        }
        if x.len() != y.len() {
            return Err(PipelineError::InputShape {
                what: "training labels",
                expected: x.len(),
                actual: y.len(),
            });
        }
        let n_features = match x.first() {
            Some(first) if first.dim() > 0 => first.dim(),
            Some(_) => return Err(PipelineError::config("training vectors have no features")),
            None => return Err(PipelineError::config("cannot fit classifier on zero samples")),
        };

        let mut class_counts = [0usize; 2];
        let mut feature_sums = [vec![0.0; n_features], vec![0.0; n_features]];
        for (row, label) in x.iter().zip(y) {
            if row.dim() != n_features {
                return Err(PipelineError::InputShape {
                    what: "training vector",
                    expected: n_features,
                    actual: row.dim(),
                });
            }
            let class = label.index();
            class_counts[class] += 1;
            for (idx, weight) in row.nonzero() {
                feature_sums[class][idx] += weight;
            }
        }

        let present = class_counts.iter().filter(|count| **count > 0).count();
        if present < Label::ALL.len() {
            return Err(PipelineError::config(format!(
                "training data needs both classes, got ham = {}, spam = {}",
                class_counts[0], class_counts[1]
            )));
        }

        let total = x.len() as f64;
        let alpha = self.alpha;
        let class_log_prior = class_counts.map(|count| (count as f64 / total).ln());
        let feature_log_prob = feature_sums.map(|sums| {
            let denominator = sums.iter().sum::<f64>() + alpha * n_features as f64;
            sums.iter()
                .map(|sum| ((sum + alpha) / denominator).ln())
                .collect::<Vec<_>>()
        });

        tracing::debug!(
            target: "classifier",
            samples = x.len(),
            features = n_features,
            ham = class_counts[0],
            spam = class_counts[1],
            alpha,
            "naive bayes fitted"
        );

        Ok(&*self.params.insert(ModelParameters {
            class_log_prior,
            feature_log_prob,
        }))
    }

    /// Per-class `log P(c) + sum(w * log P(t | c))`.
    pub fn joint_log_likelihood(&self, row: &DocumentVector) -> PipelineResult<[f64; 2]> {
        let params = self
            .params
            .as_ref()
            .ok_or(PipelineError::NotFitted("classifier"))?;
        if row.dim() != params.n_features() {
            return Err(PipelineError::InputShape {
                what: "document vector",
                expected: params.n_features(),
                actual: row.dim(),
            });
        }

        let mut scores = params.class_log_prior;
        for label in Label::ALL {
            let class = label.index();
            scores[class] += row
                .nonzero()
                .map(|(idx, weight)| weight * params.feature_log_prob[class][idx])
                .sum::<f64>();
        }
        Ok(scores)
    }

    pub fn predict(&self, x: &[DocumentVector]) -> PipelineResult<Vec<Label>> {
        Ok(self
            .predict_with_confidence(x)?
            .into_iter()
            .map(|prediction| prediction.label)
            .collect())
    }

    pub fn predict_with_confidence(
        &self,
        x: &[DocumentVector],
    ) -> PipelineResult<Vec<Prediction>> {
        x.iter()
            .map(|row| {
                let scores = self.joint_log_likelihood(row)?;
                Ok(decide(scores))
            })
            .collect()
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

// Ties go to ham.
fn decide(scores: [f64; 2]) -> Prediction {
    let label = if scores[Label::Spam.index()] > scores[Label::Ham.index()] {
        Label::Spam
    } else {
        Label::Ham
    };
    let max = scores[0].max(scores[1]);
    let denominator: f64 = scores.iter().map(|s| (s - max).exp()).sum();
    let confidence = (scores[label.index()] - max).exp() / denominator;
    Prediction { label, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{corpus::sample_records, text::TfidfVectorizer};

    const EPS: f64 = 1e-9;

    fn toy() -> (Vec<DocumentVector>, Vec<Label>) {
        (
            vec![
                DocumentVector::new(vec![1.0, 0.0]),
                DocumentVector::new(vec![0.0, 1.0]),
            ],
            vec![Label::Ham, Label::Spam],
        )
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = MultinomialNb::default();
        let err = model.predict(&[DocumentVector::zeros(2)]).unwrap_err();
        assert_eq!(err, PipelineError::NotFitted("classifier"));
    }

    #[test]
    fn laplace_smoothed_parameters() {
        let (x, y) = toy();
        let mut model = MultinomialNb::default();
        let params = model.fit(&x, &y).unwrap();
        assert!((params.class_log_prior[0] - 0.5f64.ln()).abs() < EPS);
        assert!((params.feature_log_prob[0][0] - (2.0f64 / 3.0).ln()).abs() < EPS);
        assert!((params.feature_log_prob[0][1] - (1.0f64 / 3.0).ln()).abs() < EPS);
        assert!((params.feature_log_prob[1][1] - (2.0f64 / 3.0).ln()).abs() < EPS);
    }

    #[test]
    fn predicts_dominant_feature_class() {
        let (x, y) = toy();
        let mut model = MultinomialNb::default();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y);
    }

    #[test]
    fn ties_resolve_to_ham_with_even_confidence() {
        let (x, y) = toy();
        let mut model = MultinomialNb::default();
        model.fit(&x, &y).unwrap();
        let prediction = model
            .predict_with_confidence(&[DocumentVector::zeros(2)])
            .unwrap()[0];
        assert_eq!(prediction.label, Label::Ham);
        assert!((prediction.confidence - 0.5).abs() < EPS);
    }

    #[test]
    fn single_class_training_is_rejected() {
        let mut model = MultinomialNb::default();
        let x = vec![DocumentVector::new(vec![1.0]), DocumentVector::new(vec![0.5])];
        let err = model.fit(&x, &[Label::Spam, Label::Spam]).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
        assert!(model.parameters().is_none());
    }

    #[test]
    fn shape_mismatches_are_reported() {
        let (x, y) = toy();
        let mut model = MultinomialNb::default();
        assert!(matches!(
            model.fit(&x, &y[..1]),
            Err(PipelineError::InputShape { .. })
        ));

        let ragged = vec![x[0].clone(), DocumentVector::new(vec![1.0, 0.0, 0.0])];
        assert!(matches!(
            model.fit(&ragged, &y),
            Err(PipelineError::InputShape {
                expected: 2,
                actual: 3,
                ..
            })
        ));

        model.fit(&x, &y).unwrap();
        assert!(matches!(
            model.predict(&[DocumentVector::zeros(5)]),
            Err(PipelineError::InputShape {
                expected: 2,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn non_positive_alpha_is_rejected() {
        let (x, y) = toy();
        let mut model = MultinomialNb::new(0.0);
        assert!(matches!(model.fit(&x, &y), Err(PipelineError::Configuration(_))));
    }

    #[test]
    fn fits_sample_corpus_cleanly() {
        let records = sample_records();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<Label> = records.iter().map(|r| r.label).collect();

        let mut vectorizer = TfidfVectorizer::default();
        let x = vectorizer.fit_transform(&texts).unwrap();
        let mut model = MultinomialNb::default();
        model.fit(&x, &labels).unwrap();

        assert_eq!(model.predict(&x).unwrap(), labels);
        for prediction in model.predict_with_confidence(&x).unwrap() {
            assert!(prediction.confidence >= 0.5 && prediction.confidence <= 1.0);
        }
    }
}

use std::fs;

use anyhow::{Context, Result};

use crate::{
    config::{AppConfig, ReportFormat},
    corpus::{self, Split},
    domain::{Label, Prediction, Record},
    error::PipelineResult,
    evaluation::{self, InferenceResult, RunReport, TestPrediction},
    infrastructure::directories::ResolvedPaths,
    model::MultinomialNb,
    text::{TfidfVectorizer, Tokenizer},
};

/// Vectorizer and model fitted on the same training partition.
pub struct TrainedPipeline {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl TrainedPipeline {
    pub fn fit(train: &[Record], config: &AppConfig) -> PipelineResult<Self> {
        let tokenizer = Tokenizer::new(config.vectorizer.remove_stop_words);
        let mut vectorizer = TfidfVectorizer::new(tokenizer, config.vectorizer.min_df);
        let texts: Vec<&str> = train.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<Label> = train.iter().map(|r| r.label).collect();

        let x_train = vectorizer.fit_transform(&texts)?;
        let mut model = MultinomialNb::new(config.classifier.alpha);
        model.fit(&x_train, &labels)?;

        Ok(Self { vectorizer, model })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features().unwrap_or(0)
    }

    pub fn predict<S: AsRef<str>>(&self, messages: &[S]) -> PipelineResult<Vec<Label>> {
        let x = self.vectorizer.transform(messages)?;
        self.model.predict(&x)
    }

    pub fn classify<S: AsRef<str>>(&self, messages: &[S]) -> PipelineResult<Vec<Prediction>> {
        let x = self.vectorizer.transform(messages)?;
        self.model.predict_with_confidence(&x)
    }
}

/// Split, fit, score, and classify the inference messages.
pub fn run_pipeline(
    records: &[Record],
    config: &AppConfig,
) -> PipelineResult<(TrainedPipeline, RunReport)> {
    let summary = corpus::summarize(records);
    tracing::info!(
        target: "app",
        total = summary.total,
        ham = summary.ham,
        spam = summary.spam,
        "corpus ready"
    );

    let Split { train, test } =
        corpus::train_test_split(records, config.split.test_ratio, config.split.seed)?;
    let pipeline = TrainedPipeline::fit(&train, config)?;
    let n_features = pipeline.vocabulary_size();
    tracing::info!(
        target: "app",
        train = train.len(),
        test = test.len(),
        vocabulary = n_features,
        "model trained"
    );

    let test_texts: Vec<&str> = test.iter().map(|r| r.text.as_str()).collect();
    let y_true: Vec<Label> = test.iter().map(|r| r.label).collect();
    let y_pred = pipeline.predict(&test_texts)?;
    let metrics = evaluation::score(&y_true, &y_pred)?;
    let predictions = pipeline.classify(&test_texts)?;
    tracing::info!(
        target: "app",
        accuracy = metrics.accuracy,
        f1 = metrics.f1,
        "held-out partition scored"
    );

    let test_predictions = test
        .iter()
        .zip(&predictions)
        .map(|(record, prediction)| TestPrediction {
            text: record.text.clone(),
            actual: record.label,
            predicted: prediction.label,
            confidence: prediction.confidence,
        })
        .collect();

    let inference = pipeline
        .classify(&config.inference_messages)?
        .into_iter()
        .zip(&config.inference_messages)
        .map(|(prediction, text)| InferenceResult {
            text: text.clone(),
            label: prediction.label,
            confidence: prediction.confidence,
        })
        .collect();

    let report = RunReport {
        corpus: summary,
        train_size: train.len(),
        test_size: test.len(),
        vocabulary_size: n_features,
        train_shape: (train.len(), n_features),
        test_shape: (test.len(), n_features),
        metrics,
        test_predictions,
        inference,
    };
    Ok((pipeline, report))
}

pub struct SpamLabApp {
    config: AppConfig,
    paths: ResolvedPaths,
}

impl SpamLabApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Self {
        Self { config, paths }
    }

    pub fn run(self) -> Result<()> {
        let SpamLabApp { config, paths } = self;

        let records = match &config.corpus_path {
            Some(path) => corpus::load_tsv(path)?,
            None => corpus::sample_records(),
        };

        let (_, report) = run_pipeline(&records, &config).context("training pipeline aborted")?;

        let json = report.to_json()?;
        fs::write(&paths.report_path, &json)
            .with_context(|| format!("failed to write {}", paths.report_path.display()))?;
        tracing::info!(target: "app", path = %paths.report_path.display(), "report written");

        match config.report_format {
            ReportFormat::Text => print!("{}", report.render()),
            ReportFormat::Json => println!("{json}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectoryConfig;

    const MEETING: &str = "Meeting reminder for tomorrow at 10 AM.";
    const PARCEL: &str =
        "URGENT! Your Amazon parcel is pending delivery. Update shipping details to avoid delays.";

    fn default_config() -> AppConfig {
        AppConfig::from_source(|_| None).unwrap()
    }

    #[test]
    fn reference_run_matches_recorded_values() {
        let records = corpus::sample_records();
        let (_, report) = run_pipeline(&records, &default_config()).unwrap();

        assert_eq!(report.train_size, 12);
        assert_eq!(report.test_size, 3);
        assert_eq!(report.vocabulary_size, 61);
        assert_eq!(report.train_shape, (12, 61));
        assert_eq!(report.test_shape, (3, 61));

        let held_out: Vec<(&str, Label, Label)> = report
            .test_predictions
            .iter()
            .map(|p| (p.text.as_str(), p.actual, p.predicted))
            .collect();
        assert_eq!(
            held_out,
            vec![
                (
                    "Don't forget the team meeting at 3 PM today.",
                    Label::Ham,
                    Label::Ham
                ),
                (
                    "You have been selected for a free vacation. Reply YES to claim.",
                    Label::Spam,
                    Label::Spam
                ),
                (
                    "Please review the attached document before our call.",
                    Label::Ham,
                    Label::Ham
                ),
            ]
        );
        // No token of the last record survives into the training vocabulary,
        // so it scores an exact tie on equal priors and falls to ham.
        assert!((report.test_predictions[2].confidence - 0.5).abs() < 1e-12);

        assert_eq!(
            evaluation::report(&report.metrics),
            "Accuracy:  1.0000\nPrecision: 1.0000\nRecall:    1.0000\nF1 Score:  1.0000\n"
        );
        assert_eq!(report.metrics.confusion.total(), report.test_size);

        let (_, again) = run_pipeline(&records, &default_config()).unwrap();
        assert_eq!(again, report);
    }

    #[test]
    fn scenario_messages_are_classified() {
        let records = corpus::sample_records();
        let (pipeline, report) = run_pipeline(&records, &default_config()).unwrap();

        let labels: Vec<Label> = pipeline
            .classify(&[MEETING, PARCEL])
            .unwrap()
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec![Label::Ham, Label::Spam]);

        let by_text = |text: &str| {
            report
                .inference
                .iter()
                .find(|r| r.text == text)
                .map(|r| r.label.as_str())
        };
        assert_eq!(by_text(MEETING), Some("ham"));
        assert_eq!(by_text(PARCEL), Some("spam"));
    }

    #[test]
    fn scenario_holds_for_other_seeds() {
        let records = corpus::sample_records();
        for seed in [0, 1, 7, 1234] {
            let mut config = default_config();
            config.split.seed = seed;
            let (pipeline, _) = run_pipeline(&records, &config).unwrap();
            let labels: Vec<Label> = pipeline
                .classify(&[MEETING, PARCEL])
                .unwrap()
                .into_iter()
                .map(|p| p.label)
                .collect();
            assert_eq!(labels, vec![Label::Ham, Label::Spam], "seed {seed}");
        }
    }

    #[test]
    fn single_class_corpus_aborts() {
        let records: Vec<Record> = corpus::sample_records()
            .into_iter()
            .filter(|r| r.label == Label::Spam)
            .collect();
        let err = run_pipeline(&records, &default_config()).err().unwrap();
        assert!(matches!(err, crate::error::PipelineError::Configuration(_)));
    }

    #[test]
    fn app_writes_json_report() {
        let root = tempfile::tempdir().unwrap();
        let mut config = default_config();
        config.directories = DirectoryConfig {
            logs_dir: root.path().join("logs").display().to_string(),
            reports_dir: root.path().join("reports").display().to_string(),
        };
        let paths = crate::infrastructure::directories::ensure_directories(&config.directories)
            .unwrap();
        let report_path = paths.report_path.clone();

        SpamLabApp::initialize(config, paths).run().unwrap();

        let raw = fs::read_to_string(report_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["corpus"]["total"], 15);
        assert_eq!(value["test_size"], 3);
    }
}

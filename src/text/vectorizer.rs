use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    domain::DocumentVector,
    error::{PipelineError, PipelineResult},
};

use super::tokenizer::Tokenizer;

/// Token to column mapping, indices assigned in sorted token order.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { index, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    #[cfg(test)]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
}

/// TF-IDF with smoothed idf and L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    min_df: usize,
    fitted: Option<Fitted>,
}

impl TfidfVectorizer {
    pub fn new(tokenizer: Tokenizer, min_df: usize) -> Self {
        Self {
            tokenizer,
            min_df: min_df.max(1),
            fitted: None,
        }
    }

    pub fn fit<S: AsRef<str>>(&mut self, texts: &[S]) -> PipelineResult<&Vocabulary> {
        if texts.is_empty() {
            return Err(PipelineError::config("cannot fit vectorizer on zero documents"));
        }

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for text in texts {
            let unique: HashSet<String> =
                self.tokenizer.tokenize(text.as_ref()).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let n_docs = texts.len() as f64;
        let (terms, idf): (Vec<String>, Vec<f64>) = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .map(|(term, df)| {
                let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
                (term, idf)
            })
            .unzip();

        if terms.is_empty() {
            return Err(PipelineError::config(format!(
                "empty vocabulary after filtering (min_df = {})",
                self.min_df
            )));
        }

        tracing::debug!(
            target: "vectorizer",
            documents = texts.len(),
            vocabulary = terms.len(),
            min_df = self.min_df,
            "vectorizer fitted"
        );

        let fitted = self.fitted.insert(Fitted {
            vocabulary: Vocabulary::from_sorted(terms),
            idf,
        });
        Ok(&fitted.vocabulary)
    }

    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> PipelineResult<Vec<DocumentVector>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(PipelineError::NotFitted("vectorizer"))?;
        Ok(texts
            .iter()
            .map(|text| self.vectorize(fitted, text.as_ref()))
            .collect())
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        texts: &[S],
    ) -> PipelineResult<Vec<DocumentVector>> {
        self.fit(texts)?;
        self.transform(texts)
    }

    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.fitted.as_ref().map(|fitted| &fitted.vocabulary)
    }

    #[cfg(test)]
    pub fn idf(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|fitted| fitted.idf.as_slice())
    }

    pub fn n_features(&self) -> Option<usize> {
        self.vocabulary().map(Vocabulary::len)
    }

    fn vectorize(&self, fitted: &Fitted, text: &str) -> DocumentVector {
        let mut values = vec![0.0; fitted.vocabulary.len()];
        for token in self.tokenizer.tokenize(text) {
            if let Some(idx) = fitted.vocabulary.get(&token) {
                values[idx] += 1.0;
            }
        }
        for (value, idf) in values.iter_mut().zip(&fitted.idf) {
            *value *= idf;
        }

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
        DocumentVector::new(values)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(Tokenizer::default(), 1)
    }
}

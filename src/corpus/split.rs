use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    domain::{Label, Record},
    error::{PipelineError, PipelineResult},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Vec<Record>,
    pub test: Vec<Record>,
}

/// Seeded, label-stratified partition. Both halves keep corpus order.
pub fn train_test_split(records: &[Record], test_ratio: f64, seed: u64) -> PipelineResult<Split> {
    if !(test_ratio.is_finite() && test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(PipelineError::config(format!(
            "test ratio must lie strictly between 0 and 1, got {test_ratio}"
        )));
    }

    let total = records.len();
    let n_test = (total as f64 * test_ratio - 1e-9).ceil().max(0.0) as usize;
    if n_test == 0 || n_test >= total {
        return Err(PipelineError::config(format!(
            "test ratio {test_ratio} leaves an empty partition for {total} records"
        )));
    }

    let quotas = class_quotas(records, n_test);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut in_test = vec![false; total];

    for label in Label::ALL {
        let mut indices: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.label == label)
            .map(|(idx, _)| idx)
            .collect();
        indices.shuffle(&mut rng);
        for idx in indices.into_iter().take(quotas[label.index()]) {
            in_test[idx] = true;
        }
    }

    let (test, train): (Vec<_>, Vec<_>) = records
        .iter()
        .cloned()
        .zip(in_test)
        .partition(|(_, is_test)| *is_test);

    let split = Split {
        train: train.into_iter().map(|(record, _)| record).collect(),
        test: test.into_iter().map(|(record, _)| record).collect(),
    };
    tracing::debug!(
        target: "corpus",
        seed,
        train = split.train.len(),
        test = split.test.len(),
        "corpus partitioned"
    );
    Ok(split)
}

/// Largest-remainder allocation of `n_test` across classes.
fn class_quotas(records: &[Record], n_test: usize) -> [usize; 2] {
    let total = records.len() as f64;
    let mut counts = [0usize; 2];
    for record in records {
        counts[record.label.index()] += 1;
    }

    let mut quotas = [0usize; 2];
    let mut remainders = Vec::with_capacity(2);
    for label in Label::ALL {
        let exact = counts[label.index()] as f64 * n_test as f64 / total;
        quotas[label.index()] = exact.floor() as usize;
        remainders.push((label, exact - exact.floor()));
    }

    let assigned: usize = quotas.iter().sum();
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    for (label, _) in remainders.into_iter().take(n_test.saturating_sub(assigned)) {
        quotas[label.index()] += 1;
    }
    quotas
}

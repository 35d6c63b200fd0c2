mod loader;
mod sample;
mod split;

pub use loader::load_tsv;
pub use sample::{sample_records, SAMPLE_MESSAGES};
pub use split::{train_test_split, Split};

use crate::domain::{CorpusSummary, Record};

pub fn summarize(records: &[Record]) -> CorpusSummary {
    CorpusSummary::from_records(records)
}

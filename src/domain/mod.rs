pub mod record;
pub mod types;

pub use record::{Label, Record};
pub use types::{CorpusSummary, DocumentVector, Prediction};

//! Normalization, comparison, and aggregation of paired tool output.

pub mod compare;
pub mod normalize;
pub mod report;

pub use compare::{excerpt, Comparator, Divergence, TextPolicy, Verdict, DEFAULT_EXCERPT_CHARS};
pub use normalize::{normalize, NormalizedText, FULL_HASH_PLACEHOLDER, SHORT_HASH_PLACEHOLDER};
pub use report::{RunReport, ScenarioOutcome, Summary};

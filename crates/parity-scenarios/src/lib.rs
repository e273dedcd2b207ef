//! Scenario orchestration.
//!
//! A run builds the same fixture in both instances, then drives an ordered
//! pipeline of scenarios through a [`Session`]. Every tool invocation and
//! filesystem mutation goes through the session, which applies it to both
//! instances in the same order with the same pinned date, so any difference
//! in output is attributable to the tool build alone.

mod context;
mod error;
pub mod fixture;
pub mod library;
mod pair;
mod pipeline;
mod policy;
mod session;

pub use context::{Paired, ScenarioContext, DEFAULT_RAPID_FILES, DEFAULT_RAPID_PROBE_INTERVAL};
pub use error::ScenarioError;
pub use fixture::InstanceConfig;
pub use library::Scenario;
pub use pair::InstancePair;
pub use pipeline::{Harness, HarnessConfig};
pub use policy::Equivalence;
pub use session::Session;

pub type Result<T> = std::result::Result<T, ScenarioError>;

//! Tool instances, invocations, and the synchronous command runner.
//!
//! Each run compares two builds of the same version-control tool. A
//! [`ToolInstance`] pairs one build with its own isolated working tree, and
//! [`ToolInstance::run`] executes an [`Invocation`] against it, returning a
//! [`CapturedResult`]. A nonzero exit is data, not an error: the only
//! failure the runner reports is a tool that cannot be launched at all.

pub mod env;
mod error;
mod instance;
mod invocation;
mod result;
mod runner;

pub use env::{DateCounter, Identity};
pub use error::ExecError;
pub use instance::{Label, ToolInstance};
pub use invocation::Invocation;
pub use result::CapturedResult;

pub type Result<T> = std::result::Result<T, ExecError>;

//! Hook lifecycle for Gherkin test runs.
//!
//! Hooks run before and after each feature, scenario and step. Every hook
//! may carry a priority; lower priorities run first, hooks without one run
//! last, and hooks of equal priority run in registration order.
//!
//! [`DesignatedExecutor`] funnels work onto one dedicated thread so hook
//! registration and execution can share a single thread of control.

mod executor;
mod hooks;

pub use executor::{DesignatedExecutor, ExecutorError};
pub use hooks::{HookPriority, HookSet, Lifecycle};

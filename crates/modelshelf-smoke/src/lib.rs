//! Modelshelf Smoke Tests
//!
//! A small harness that runs one fixed input through a representative
//! model of every cataloged task family and compares the output against
//! recorded values. Scenarios are discovered by name prefix and run in
//! table order; the first mismatch halts the run.

pub mod counters;
pub mod harness;
pub mod scenarios;

pub use counters::CallCounters;
pub use harness::{run_all, Failure, Scenario};
pub use scenarios::SCENARIOS;

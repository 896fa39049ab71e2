//! populator-core: synthetic data for the security-awareness case study.
//!
//! Generation (`generator`, `statistics`) is pure and deterministic for a
//! given seed and reference date. Everything that touches a database lives
//! in `store`, and `pipeline` ties the two together for one run.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod profile_faker;
pub mod rng;
pub mod round_robin;
pub mod sampler;
pub mod statistics;
pub mod store;
pub mod types;

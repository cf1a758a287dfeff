//! Workload generator and benchmark utilities for moorepath.
//!
//! This crate provides deterministic generation of cost graphs with negative
//! edge costs for benchmarking and correctness testing of `moorepath-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, Workload, generate_workload};

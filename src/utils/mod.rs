//! Configuration and reference-table loading

pub mod config;

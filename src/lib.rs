//! DevMeter - developer metrics from GitHub activity
//!
//! Fetches a user's public activity, turns it into five normalized
//! sub-scores (seniority, versatility, productivity, code quality and
//! community impact), combines them into a weighted 0-100 composite with
//! a tier label, and stores the result keyed by the user's GitHub id.
//!
//! The scoring functions in [`scoring`] are pure. I/O lives behind
//! [`github::ActivityDataSource`] and [`store::MetricsStore`], which
//! [`pipeline::MetricsPipeline`] ties together.

pub mod cli;
pub mod config;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
pub mod server;
pub mod store;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod jitter;
pub mod metrics;
pub mod report;
pub mod results;
pub mod settings;

pub mod aggregate;
pub mod cache;
pub mod datasets;
pub mod generator;

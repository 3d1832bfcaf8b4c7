pub mod forecast;
pub mod origin;
pub mod products;
pub mod ratings;
pub mod totals;

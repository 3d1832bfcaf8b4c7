use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::ProductCatalog;
use crate::jitter::Jitter;

pub const TOP_PRODUCT_LIMIT: usize = 5;

const SEED_PRODUCTS: [(&str, f64); TOP_PRODUCT_LIMIT] = [
    ("Dokra Metal Craft", 35.0),
    ("Bamboo Basketry", 25.0),
    ("Sohrai Paintings", 20.0),
    ("Paitkar Scrolls", 12.0),
    ("Guided Heritage Walks", 8.0),
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopProductShare {
    pub name: String,
    pub value: u32,
}

/// Percentage share of the five heaviest sellers. Listed products are
/// weighted by price and a random sales multiplier; an empty catalog falls
/// back to the seed list.
pub fn top_products<C, J>(catalog: &C, jitter: &mut J) -> Vec<TopProductShare>
where
    C: ProductCatalog + ?Sized,
    J: Jitter,
{
    let mut weights = Vec::new();
    for product in catalog.products() {
        if !product.price.is_finite() || product.price <= 0.0 {
            warn!(name = %product.name, price = product.price, "skipping product without a usable price");
            continue;
        }
        weights.push((product.name.clone(), product.price * jitter.in_range(0.5, 1.5)));
    }
    if weights.is_empty() {
        weights = SEED_PRODUCTS
            .iter()
            .map(|(name, weight)| ((*name).to_string(), *weight))
            .collect();
    }

    weights.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    weights.truncate(TOP_PRODUCT_LIMIT);
    normalize_percentages(&weights)
}

/// Largest-remainder rounding, so the shares add up to exactly 100.
pub fn normalize_percentages(weights: &[(String, f64)]) -> Vec<TopProductShare> {
    let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
    if !total.is_finite() || total <= 0.0 {
        return Vec::new();
    }

    let raw: Vec<f64> = weights
        .iter()
        .map(|(_, weight)| weight / total * 100.0)
        .collect();
    let mut values: Vec<u32> = raw.iter().map(|share| share.floor() as u32).collect();

    let assigned: u32 = values.iter().sum();
    let mut by_remainder: Vec<usize> = (0..raw.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = raw[a] - raw[a].floor();
        let rb = raw[b] - raw[b].floor();
        rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
    });
    for idx in by_remainder
        .into_iter()
        .take(100u32.saturating_sub(assigned) as usize)
    {
        values[idx] += 1;
    }

    weights
        .iter()
        .zip(values)
        .map(|((name, _), value)| TopProductShare {
            name: name.clone(),
            value,
        })
        .collect()
}

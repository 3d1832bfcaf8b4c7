use serde::{Deserialize, Serialize};

use crate::data::datasets::{FootfallPoint, RevenuePoint};

pub const DEFAULT_CONVERSION_RATE: f64 = 0.6;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub local: u64,
    pub domestic: u64,
    pub international: u64,
    pub visitors: u64,
    pub revenue: u64,
    pub converting_visitors: u64,
    pub average_order_value: f64,
}

/// Sums footfall and revenue. Converting visitors are a fixed share of all
/// visits, never below one.
pub fn compute_totals<'a, F, R>(footfall: F, revenue: R, conversion_rate: f64) -> Totals
where
    F: IntoIterator<Item = &'a FootfallPoint>,
    R: IntoIterator<Item = &'a RevenuePoint>,
{
    let mut totals = Totals::default();
    for point in footfall {
        totals.local += point.local;
        totals.domestic += point.domestic;
        totals.international += point.international;
    }
    totals.visitors = totals.local + totals.domestic + totals.international;
    totals.revenue = revenue.into_iter().map(|point| point.revenue).sum();

    let converting = (totals.visitors as f64 * conversion_rate).floor();
    // NaN and negative rates saturate to zero here and then hit the floor.
    totals.converting_visitors = (converting as u64).max(1);
    totals.average_order_value = totals.revenue as f64 / totals.converting_visitors as f64;
    totals
}

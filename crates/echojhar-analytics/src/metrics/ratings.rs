use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_WEEKS: usize = 8;
const TREND_AMPLITUDE: f64 = 0.1;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: u64,
}

pub const DEFAULT_DISTRIBUTION: [RatingBucket; 5] = [
    RatingBucket { stars: 5, count: 142 },
    RatingBucket { stars: 4, count: 86 },
    RatingBucket { stars: 3, count: 23 },
    RatingBucket { stars: 2, count: 7 },
    RatingBucket { stars: 1, count: 4 },
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingTrendPoint {
    pub label: String,
    pub average: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingsSummary {
    pub distribution: Vec<RatingBucket>,
    pub total: u64,
    pub average: f64,
    pub trend: Vec<RatingTrendPoint>,
}

pub fn weighted_average(distribution: &[RatingBucket]) -> f64 {
    let total: u64 = distribution.iter().map(|bucket| bucket.count).sum();
    if total == 0 {
        return 0.0;
    }
    let weighted: u64 = distribution
        .iter()
        .map(|bucket| u64::from(bucket.stars) * bucket.count)
        .sum();
    weighted as f64 / total as f64
}

/// Weekly trend wobbling within ±0.1 of the overall average.
pub fn ratings_summary(distribution: &[RatingBucket], weeks: usize) -> RatingsSummary {
    let total: u64 = distribution.iter().map(|bucket| bucket.count).sum();
    let average = weighted_average(distribution);

    let trend = (0..weeks)
        .map(|week| {
            let value = if total == 0 {
                0.0
            } else {
                (average + TREND_AMPLITUDE * (week as f64).sin()).clamp(1.0, 5.0)
            };
            RatingTrendPoint {
                label: format!("W{}", week + 1),
                average: round2(value),
            }
        })
        .collect();

    RatingsSummary {
        distribution: distribution.to_vec(),
        total,
        average: round2(average),
        trend,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

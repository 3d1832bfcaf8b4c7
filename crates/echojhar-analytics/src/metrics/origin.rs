use serde::{Deserialize, Serialize};

use super::totals::Totals;

pub const TOP_REGION_LIMIT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Segment {
    Local,
    Domestic,
    International,
}

// Shares within each segment add up to at most 1.0.
const REGION_SHARES: [(&str, Segment, f64); 16] = [
    ("Ranchi", Segment::Local, 0.45),
    ("Jamshedpur", Segment::Local, 0.25),
    ("Dhanbad", Segment::Local, 0.15),
    ("Rest of Jharkhand", Segment::Local, 0.15),
    ("West Bengal", Segment::Domestic, 0.22),
    ("Bihar", Segment::Domestic, 0.18),
    ("Odisha", Segment::Domestic, 0.15),
    ("Delhi NCR", Segment::Domestic, 0.12),
    ("Maharashtra", Segment::Domestic, 0.10),
    ("Uttar Pradesh", Segment::Domestic, 0.09),
    ("Other States", Segment::Domestic, 0.14),
    ("Bangladesh", Segment::International, 0.30),
    ("Nepal", Segment::International, 0.25),
    ("United States", Segment::International, 0.15),
    ("United Kingdom", Segment::International, 0.12),
    ("Other Countries", Segment::International, 0.18),
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OriginRegion {
    pub region: String,
    pub count: u64,
}

pub fn origin_breakdown(totals: &Totals) -> Vec<OriginRegion> {
    let mut regions: Vec<OriginRegion> = REGION_SHARES
        .iter()
        .map(|(region, segment, share)| {
            let source = match segment {
                Segment::Local => totals.local,
                Segment::Domestic => totals.domestic,
                Segment::International => totals.international,
            };
            OriginRegion {
                region: (*region).to_string(),
                count: (source as f64 * share).floor() as u64,
            }
        })
        .filter(|region| region.count > 0)
        .collect();

    regions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));
    regions.truncate(TOP_REGION_LIMIT);
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_shares_never_exceed_one() {
        for segment in [Segment::Local, Segment::Domestic, Segment::International] {
            let sum: f64 = REGION_SHARES
                .iter()
                .filter(|(_, s, _)| *s == segment)
                .map(|(_, _, share)| share)
                .sum();
            assert!(sum <= 1.0 + 1e-9, "{segment:?} shares sum to {sum}");
        }
    }
}

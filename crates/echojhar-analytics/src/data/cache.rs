use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::datasets::DailySeries;
use super::generator::{generate_daily_series, Season};
use crate::jitter::SeededJitter;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct SeriesKey {
    end_date: NaiveDate,
    days: usize,
    seed: u64,
    festival_months: Vec<u32>,
}

/// Memoises seeded series so repeated requests for the same window reuse
/// one generation. Unseeded requests always regenerate.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: HashMap<SeriesKey, Arc<DailySeries>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get_or_generate(
        &mut self,
        end_date: NaiveDate,
        days: usize,
        season: &Season,
        seed: Option<u64>,
    ) -> Arc<DailySeries> {
        let Some(seed) = seed else {
            let mut jitter = SeededJitter::from_entropy();
            return Arc::new(generate_daily_series(end_date, days, season, &mut jitter));
        };

        let key = SeriesKey {
            end_date,
            days,
            seed,
            festival_months: season.festival_months.clone(),
        };
        if let Some(existing) = self.entries.get(&key) {
            debug!(%end_date, days, seed, "series cache hit");
            return Arc::clone(existing);
        }

        debug!(%end_date, days, seed, "series cache miss");
        let mut jitter = SeededJitter::from_seed(seed);
        let series = Arc::new(generate_daily_series(end_date, days, season, &mut jitter));
        self.entries.insert(key, Arc::clone(&series));
        series
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FootfallPoint {
    pub date: NaiveDate,
    pub local: u64,
    pub domestic: u64,
    pub international: u64,
}

impl FootfallPoint {
    pub fn visitors(&self) -> u64 {
        self.local + self.domestic + self.international
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dokra: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bamboo: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paintings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<u64>,
}

impl RevenuePoint {
    pub fn from_categories(
        date: NaiveDate,
        dokra: u64,
        bamboo: u64,
        paintings: u64,
        services: u64,
    ) -> Self {
        Self {
            date,
            revenue: dokra + bamboo + paintings + services,
            dokra: Some(dokra),
            bamboo: Some(bamboo),
            paintings: Some(paintings),
            services: Some(services),
        }
    }

    pub fn category_sum(&self) -> u64 {
        [self.dokra, self.bamboo, self.paintings, self.services]
            .into_iter()
            .flatten()
            .sum()
    }
}

/// Footfall and revenue for one calendar day, joined on `date`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub footfall: FootfallPoint,
    pub revenue: RevenuePoint,
}

/// Ascending, date-unique run of daily records.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    records: Vec<DailyRecord>,
}

impl DailySeries {
    /// Sorts by date and keeps the first record for any repeated date.
    pub fn from_records(mut records: Vec<DailyRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        records.dedup_by_key(|record| record.date);
        Self { records }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|record| record.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|record| record.date)
    }

    pub fn by_date(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records
            .binary_search_by_key(&date, |record| record.date)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn footfall(&self) -> Vec<FootfallPoint> {
        self.records
            .iter()
            .map(|record| record.footfall.clone())
            .collect()
    }

    pub fn revenue(&self) -> Vec<RevenuePoint> {
        self.records
            .iter()
            .map(|record| record.revenue.clone())
            .collect()
    }
}

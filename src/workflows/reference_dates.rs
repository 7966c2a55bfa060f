use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use tracing::info;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far back from today a reference date lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    Today,
    LastWeek,
    TwoWeeksAgo,
    LastMonth,
    TwoMonthsAgo,
    LastYear,
    TwoYearsAgo,
    FiveYearsAgo,
    TenYearsAgo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offset {
    Days(u64),
    Months(u32),
}

impl DateBucket {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Today,
            Self::LastWeek,
            Self::TwoWeeksAgo,
            Self::LastMonth,
            Self::TwoMonthsAgo,
            Self::LastYear,
            Self::TwoYearsAgo,
            Self::FiveYearsAgo,
            Self::TenYearsAgo,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::LastWeek => "last week",
            Self::TwoWeeksAgo => "2nd last week",
            Self::LastMonth => "last month",
            Self::TwoMonthsAgo => "2nd last month",
            Self::LastYear => "last year",
            Self::TwoYearsAgo => "2nd last year",
            Self::FiveYearsAgo => "5th last year",
            Self::TenYearsAgo => "10th last year",
        }
    }

    const fn offset(self) -> Offset {
        match self {
            Self::Today => Offset::Days(0),
            Self::LastWeek => Offset::Days(7),
            Self::TwoWeeksAgo => Offset::Days(14),
            Self::LastMonth => Offset::Months(1),
            Self::TwoMonthsAgo => Offset::Months(2),
            Self::LastYear => Offset::Months(12),
            Self::TwoYearsAgo => Offset::Months(24),
            Self::FiveYearsAgo => Offset::Months(60),
            Self::TenYearsAgo => Offset::Months(120),
        }
    }

    /// Month steps clamp to the last day of a shorter target month
    /// (2024-03-31 minus one month is 2024-02-29).
    pub fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self.offset() {
            Offset::Days(days) => today.checked_sub_days(Days::new(days)),
            Offset::Months(months) => today.checked_sub_months(Months::new(months)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDateError {
    #[error("{} date for {today} falls outside the supported calendar range", .bucket.label())]
    OutOfRange { bucket: DateBucket, today: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDate {
    pub bucket: DateBucket,
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, the filename prefix this date matches.
    pub prefix: String,
}

/// The full set of reference dates for one run. Only constructible whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDates {
    today: NaiveDate,
    entries: Vec<ReferenceDate>,
}

impl ReferenceDates {
    pub fn for_day(today: NaiveDate) -> Result<Self, ReferenceDateError> {
        let entries = DateBucket::ordered()
            .into_iter()
            .map(|bucket| {
                let date = bucket
                    .resolve(today)
                    .ok_or(ReferenceDateError::OutOfRange { bucket, today })?;
                Ok(ReferenceDate {
                    bucket,
                    date,
                    prefix: date.format(DATE_FORMAT).to_string(),
                })
            })
            .collect::<Result<Vec<_>, ReferenceDateError>>()?;

        info!(%today, "computed reference dates");
        for entry in &entries {
            info!(bucket = entry.bucket.label(), date = %entry.prefix, "reference date");
        }

        Ok(Self { today, entries })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn entries(&self) -> &[ReferenceDate] {
        &self.entries
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.prefix.as_str())
    }

    /// First reference date (in bucket order) that prefixes `file_name`.
    pub fn match_prefix(&self, file_name: &str) -> Option<&ReferenceDate> {
        self.entries
            .iter()
            .find(|entry| file_name.starts_with(entry.prefix.as_str()))
    }

    /// ISO calendar week (year, week) that today falls in.
    pub fn current_iso_week(&self) -> (i32, u32) {
        let week = self.today.iso_week();
        (week.year(), week.week())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn computes_all_buckets_for_mid_month() {
        let dates = ReferenceDates::for_day(day(2024, 3, 15)).expect("dates build");
        let prefixes: Vec<&str> = dates.prefixes().collect();
        assert_eq!(
            prefixes,
            vec![
                "2024-03-15",
                "2024-03-08",
                "2024-03-01",
                "2024-02-15",
                "2024-01-15",
                "2023-03-15",
                "2022-03-15",
                "2019-03-15",
                "2014-03-15",
            ]
        );
        let buckets: Vec<DateBucket> = dates.entries().iter().map(|entry| entry.bucket).collect();
        assert_eq!(buckets, DateBucket::ordered().to_vec());
    }

    #[test]
    fn month_steps_clamp_to_shorter_months() {
        let dates = ReferenceDates::for_day(day(2024, 3, 31)).expect("dates build");
        let entries = dates.entries();
        assert_eq!(entries[3].bucket, DateBucket::LastMonth);
        assert_eq!(entries[3].date, day(2024, 2, 29));
        assert_eq!(entries[4].date, day(2024, 1, 31));
        assert_eq!(entries[5].date, day(2023, 3, 31));
    }

    #[test]
    fn leap_day_clamps_in_non_leap_years() {
        let dates = ReferenceDates::for_day(day(2024, 2, 29)).expect("dates build");
        let last_year = &dates.entries()[5];
        assert_eq!(last_year.bucket, DateBucket::LastYear);
        assert_eq!(last_year.prefix, "2023-02-28");
        let five_years = &dates.entries()[7];
        assert_eq!(five_years.prefix, "2019-02-28");
    }

    #[test]
    fn day_offsets_cross_year_boundaries() {
        let dates = ReferenceDates::for_day(day(2025, 1, 3)).expect("dates build");
        assert_eq!(dates.entries()[1].prefix, "2024-12-27");
        assert_eq!(dates.entries()[2].prefix, "2024-12-20");
        assert_eq!(dates.entries()[3].prefix, "2024-12-03");
    }

    #[test]
    fn first_matching_bucket_wins() {
        let dates = ReferenceDates::for_day(day(2024, 3, 15)).expect("dates build");
        let hit = dates
            .match_prefix("2023-03-15_birthday.jpg")
            .expect("last year matches");
        assert_eq!(hit.bucket, DateBucket::LastYear);
        assert!(dates.match_prefix("img_2024-03-15.jpg").is_none());
        assert!(dates.match_prefix("2024-3-15.jpg").is_none());
    }

    #[test]
    fn reports_out_of_range_instead_of_partial_set() {
        let err = ReferenceDates::for_day(NaiveDate::MIN).expect_err("no room to go back");
        assert!(matches!(
            err,
            ReferenceDateError::OutOfRange {
                bucket: DateBucket::LastWeek,
                ..
            }
        ));
    }

    #[test]
    fn exposes_current_iso_week() {
        let dates = ReferenceDates::for_day(day(2024, 12, 30)).expect("dates build");
        assert_eq!(dates.current_iso_week(), (2025, 1));
    }
}

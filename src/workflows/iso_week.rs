use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};

/// Number of ISO weeks (52 or 53) in `year`. December 28th always falls in the last one.
pub fn weeks_in_iso_year(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 12, 28).map(|date| date.iso_week().week())
}

/// Monday of ISO week `week` in ISO year `year`.
///
/// Starts from November 30th of the previous year, rewinds to a Monday and then
/// steps forward a week at a time until the ISO year and week line up. Returns
/// `None` for week numbers the year does not have.
pub fn first_day_of_iso_week(year: i32, week: u32) -> Option<NaiveDate> {
    let weeks = weeks_in_iso_year(year)?;
    if week == 0 || week > weeks {
        return None;
    }

    let mut date = NaiveDate::from_ymd_opt(year - 1, 11, 30)?;
    while date.weekday() != Weekday::Mon {
        date = date.pred_opt()?;
    }

    while date.iso_week().year() < year {
        date = date.checked_add_days(Days::new(7))?;
    }

    while date.iso_week().week() < week {
        date = date.checked_add_days(Days::new(7))?;
    }

    Some(date)
}

/// Local midnight at the start of ISO week `week` of `year` in `tz`.
pub fn start_of_iso_week<Tz: TimeZone>(year: i32, week: u32, tz: &Tz) -> Option<DateTime<Tz>> {
    let monday = first_day_of_iso_week(year, week)?;
    tz.from_local_datetime(&monday.and_hms_opt(0, 0, 0)?)
        .earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn first_week_can_start_in_previous_year() {
        let monday = first_day_of_iso_week(2025, 1).expect("week exists");
        assert_eq!(monday, NaiveDate::from_ymd_opt(2024, 12, 30).expect("valid"));

        let monday = first_day_of_iso_week(2021, 1).expect("week exists");
        assert_eq!(monday, NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid"));
    }

    #[test]
    fn agrees_with_chrono_iso_calendar() {
        for year in 1995..=2035 {
            let weeks = weeks_in_iso_year(year).expect("year in range");
            for week in 1..=weeks {
                let expected = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon);
                assert_eq!(first_day_of_iso_week(year, week), expected, "{year}-W{week}");
            }
        }
    }

    #[test]
    fn long_years_have_week_53() {
        assert_eq!(weeks_in_iso_year(2020), Some(53));
        assert_eq!(weeks_in_iso_year(2024), Some(52));
        assert_eq!(
            first_day_of_iso_week(2020, 53),
            NaiveDate::from_ymd_opt(2020, 12, 28)
        );
    }

    #[test]
    fn rejects_weeks_the_year_does_not_have() {
        assert_eq!(first_day_of_iso_week(2024, 0), None);
        assert_eq!(first_day_of_iso_week(2024, 53), None);
    }

    #[test]
    fn start_of_week_uses_local_midnight() {
        let start = start_of_iso_week(2024, 11, &Utc).expect("week exists");
        assert_eq!(start.to_rfc3339(), "2024-03-11T00:00:00+00:00");

        let cet = FixedOffset::east_opt(3600).expect("valid offset");
        let start = start_of_iso_week(2024, 11, &cet).expect("week exists");
        assert_eq!(start.to_rfc3339(), "2024-03-11T00:00:00+01:00");
    }
}

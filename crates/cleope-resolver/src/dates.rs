//! Sampling of a sensing range into dated directory fragments.

use chrono::{Duration, NaiveDate};
use cleope_core::models::{Frequency, SensingRange};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Path fragment of one day: `/YYYY/MM/DD/`
pub fn date_fragment(date: NaiveDate) -> String {
    date.format("/%Y/%m/%d/").to_string()
}

/// `<root>/YYYY/MM/DD`
pub fn date_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(date.format("%d").to_string())
}

/// `<root>/YYYY/MM`
pub fn month_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y").to_string()).join(date.format("%m").to_string())
}

/// Sample a range every `frequency` days, oldest first.
///
/// An end date after `today` is clipped: sampling stops before today and
/// today is appended as the last date. Otherwise sampling runs one step past
/// the end, unless that step would land after today. Only the most recent
/// `limit` dates are kept.
pub fn sample_dates(
    range: &SensingRange,
    frequency: Frequency,
    today: NaiveDate,
    limit: usize,
) -> Vec<NaiveDate> {
    let step = i64::from(frequency.step_days().max(1));
    let start = range.start();
    let end = range.end();

    let (span, clipped) = if end > today {
        warn!(
            end = %end,
            today = %today,
            "End date is in the future, clipped to today"
        );
        ((today - start).num_days(), true)
    } else {
        let days = (end - start).num_days();
        match end.checked_add_signed(Duration::days(step)) {
            Some(next) if next <= today => (days + step, false),
            _ => (days, false),
        }
    };

    let mut dates: Vec<NaiveDate> = (0..span.max(0))
        .step_by(step as usize)
        .map_while(|offset| start.checked_add_signed(Duration::days(offset)))
        .collect();

    if clipped {
        dates.push(today);
    }

    if dates.len() > limit {
        dates.drain(..dates.len() - limit);
    }
    dates
}

/// Sampled dates rendered as `/YYYY/MM/DD/` fragments
pub fn dates_list(
    range: &SensingRange,
    frequency: Frequency,
    today: NaiveDate,
    limit: usize,
) -> Vec<String> {
    sample_dates(range, frequency, today, limit)
        .into_iter()
        .map(date_fragment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> SensingRange {
        SensingRange::new(start, end).unwrap()
    }

    #[test]
    fn test_daily_past_range() {
        let fragments = dates_list(
            &range(date(2024, 1, 1), date(2024, 1, 10)),
            Frequency::DAILY,
            date(2024, 6, 1),
            30,
        );
        assert_eq!(fragments.len(), 10);
        assert_eq!(fragments[0], "/2024/01/01/");
        assert_eq!(fragments[9], "/2024/01/10/");
    }

    #[test]
    fn test_future_end_is_clipped_to_today() {
        let today = date(2024, 1, 10);
        let fragments =
            dates_list(&range(date(2024, 1, 1), date(2024, 1, 11)), Frequency::DAILY, today, 30);

        assert_eq!(fragments.len(), 10);
        assert_eq!(fragments[8], "/2024/01/09/");
        assert_eq!(fragments.last().map(String::as_str), Some("/2024/01/10/"));
    }

    #[test]
    fn test_end_step_past_today_drops_extra_step() {
        let fragments = dates_list(
            &range(date(2024, 1, 1), date(2024, 1, 10)),
            Frequency::DAILY,
            date(2024, 1, 10),
            30,
        );
        assert_eq!(fragments.len(), 9);
        assert_eq!(fragments.last().map(String::as_str), Some("/2024/01/09/"));
    }

    #[test]
    fn test_weekly_sampling() {
        let weekly: Frequency = "W".parse().unwrap();
        let fragments =
            dates_list(&range(date(2024, 1, 1), date(2024, 1, 15)), weekly, date(2024, 6, 1), 30);
        assert_eq!(fragments, vec!["/2024/01/01/", "/2024/01/08/", "/2024/01/15/"]);

        let two_days: Frequency = "2 D".parse().unwrap();
        let fragments =
            dates_list(&range(date(2024, 1, 1), date(2024, 1, 5)), two_days, date(2024, 6, 1), 30);
        assert_eq!(fragments, vec!["/2024/01/01/", "/2024/01/03/", "/2024/01/05/"]);
    }

    #[test]
    fn test_limit_keeps_most_recent() {
        let fragments = dates_list(
            &range(date(2024, 1, 1), date(2024, 2, 29)),
            Frequency::DAILY,
            date(2024, 6, 1),
            30,
        );
        assert_eq!(fragments.len(), 30);
        assert_eq!(fragments[0], "/2024/01/31/");
        assert_eq!(fragments[29], "/2024/02/29/");
    }

    #[test]
    fn test_start_after_today_yields_only_today() {
        let today = date(2024, 1, 1);
        let fragments =
            dates_list(&range(date(2024, 3, 1), date(2024, 3, 5)), Frequency::DAILY, today, 30);
        assert_eq!(fragments, vec!["/2024/01/01/"]);
    }

    #[test]
    fn test_step_past_calendar_end_does_not_overflow() {
        let century: Frequency = "36525 D".parse().unwrap();
        let fragments =
            dates_list(&range(date(2020, 1, 1), date(2020, 1, 1)), century, date(2024, 1, 1), 30);
        assert!(fragments.is_empty());

        let last = NaiveDate::MAX;
        let dates = sample_dates(&SensingRange::single(last), century, last, 30);
        assert!(dates.is_empty());

        let unchecked = Frequency { multiplier: u32::MAX, unit: cleope_core::models::FrequencyUnit::Day };
        let dates = sample_dates(&range(date(2020, 1, 1), date(2020, 1, 1)), unchecked, date(2024, 1, 1), 30);
        assert!(dates.is_empty());
    }

    #[test]
    fn test_date_dirs() {
        let root = Path::new("/mnt/root");
        assert_eq!(date_dir(root, date(2024, 3, 7)), Path::new("/mnt/root/2024/03/07"));
        assert_eq!(month_dir(root, date(2024, 3, 7)), Path::new("/mnt/root/2024/03"));
    }
}

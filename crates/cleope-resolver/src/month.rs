use chrono::{Datelike, NaiveDate};

/// Same day of the previous month, clamped to that month's last day.
///
/// 2024-03-15 gives 2024-02-15, 2024-03-31 gives 2024-02-29.
pub fn one_month_back(date: NaiveDate) -> NaiveDate {
    let Some(last_of_previous) = date.with_day(1).and_then(|first| first.pred_opt()) else {
        return date;
    };

    last_of_previous
        .with_day(date.day().min(last_of_previous.day()))
        .unwrap_or(last_of_previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(one_month_back(date(2024, 3, 15)), date(2024, 2, 15));
        assert_eq!(one_month_back(date(2024, 3, 31)), date(2024, 2, 29));
        assert_eq!(one_month_back(date(2023, 3, 31)), date(2023, 2, 28));
        assert_eq!(one_month_back(date(2024, 1, 10)), date(2023, 12, 10));
        assert_eq!(one_month_back(date(2024, 5, 31)), date(2024, 4, 30));
        assert_eq!(one_month_back(date(2024, 7, 1)), date(2024, 6, 1));
    }

    proptest! {
        #[test]
        fn lands_in_previous_month(days in 0i64..20_000) {
            let start = date(1990, 1, 1) + chrono::Duration::days(days);
            let back = one_month_back(start);

            let expected_month = if start.month() == 1 { 12 } else { start.month() - 1 };
            prop_assert_eq!(back.month(), expected_month);
            prop_assert!(back.day() <= start.day());
            prop_assert!(back < start);
        }
    }
}

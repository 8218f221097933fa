//! Property-based tests for recurrence evaluation.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use cadence::Recurrence;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=31)
        .prop_filter_map("invalid calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

fn arb_weekday_set() -> impl Strategy<Value = BTreeSet<u8>> {
    proptest::collection::btree_set(0u8..=6, 1..=7)
}

proptest! {
    #[test]
    fn daily_fires_on_every_date(date in arb_date()) {
        prop_assert!(Recurrence::Daily.fires_on(date));
    }

    #[test]
    fn weekly_fires_iff_weekday_is_in_set(date in arb_date(), weekdays in arb_weekday_set()) {
        let rule = Recurrence::Weekly { weekdays: weekdays.clone() };
        let weekday = date.weekday().num_days_from_sunday() as u8;
        prop_assert_eq!(rule.fires_on(date), weekdays.contains(&weekday));
    }

    #[test]
    fn weekly_with_all_weekdays_behaves_like_daily(date in arb_date()) {
        let rule = Recurrence::Weekly { weekdays: (0u8..=6).collect() };
        prop_assert!(rule.fires_on(date));
    }

    #[test]
    fn monthly_fires_iff_day_of_month_matches(date in arb_date(), day_of_month in 1u32..=31) {
        let rule = Recurrence::Monthly { day_of_month };
        prop_assert_eq!(rule.fires_on(date), date.day() == day_of_month);
    }

    // A day-of-month beyond a month's length never fires in that month;
    // there is no clamping or last-day fallback.
    #[test]
    fn monthly_overflow_never_fires(date in arb_date()) {
        let days_in_month = {
            let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
            let next = if date.month() == 12 {
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
            } else {
                NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap()
            };
            (next - first).num_days() as u32
        };
        for day_of_month in (days_in_month + 1)..=31 {
            let rule = Recurrence::Monthly { day_of_month };
            prop_assert!(!rule.fires_on(date));
        }
    }

    #[test]
    fn recurrence_json_round_trip(weekdays in arb_weekday_set(), day_of_month in 1u32..=31) {
        for rule in [
            Recurrence::Daily,
            Recurrence::Weekly { weekdays: weekdays.clone() },
            Recurrence::Monthly { day_of_month },
        ] {
            let json = serde_json::to_string(&rule).unwrap();
            let parsed: Recurrence = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(rule, parsed);
        }
    }
}

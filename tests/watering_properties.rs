use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use plantcare::{
    days_until_watering, is_watering_due, watering::next_watering_date, InvalidIntervalError,
};
use proptest::prelude::*;

fn base_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~50 years
    (0u64..18_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn time_of_day() -> impl Strategy<Value = NaiveTime> {
    (0u32..86_400).prop_map(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap())
}

fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::new(date, time)
}

proptest! {
    #[test]
    fn result_is_interval_minus_elapsed(
        today in base_date(),
        time in time_of_day(),
        interval in 1i64..=365,
        elapsed in 0u64..=1_000,
    ) {
        let last_watered = today.checked_sub_days(Days::new(elapsed)).unwrap();
        let now = at(today, time);
        let expected = interval - i64::try_from(elapsed).unwrap();
        prop_assert_eq!(days_until_watering(last_watered, interval, now), Ok(expected));
    }

    #[test]
    fn due_matches_threshold(
        last_watered in base_date(),
        today in base_date(),
        time in time_of_day(),
        interval in 1i64..=365,
    ) {
        let now = at(today, time);
        let days = days_until_watering(last_watered, interval, now).unwrap();
        prop_assert_eq!(is_watering_due(last_watered, interval, now), Ok(days <= 0));
    }

    #[test]
    fn non_increasing_as_days_pass(
        last_watered in base_date(),
        today in base_date(),
        time in time_of_day(),
        interval in 1i64..=365,
        step in 1u64..=30,
    ) {
        let later = today.checked_add_days(Days::new(step)).unwrap();
        let before = days_until_watering(last_watered, interval, at(today, time)).unwrap();
        let after = days_until_watering(last_watered, interval, at(later, time)).unwrap();
        prop_assert!(after <= before);
        prop_assert_eq!(before - after, i64::try_from(step).unwrap());
    }

    #[test]
    fn time_of_day_is_irrelevant(
        last_watered in base_date(),
        today in base_date(),
        morning in time_of_day(),
        evening in time_of_day(),
        interval in 1i64..=365,
    ) {
        prop_assert_eq!(
            days_until_watering(last_watered, interval, at(today, morning)),
            days_until_watering(last_watered, interval, at(today, evening))
        );
    }

    #[test]
    fn future_dates_are_never_due(
        today in base_date(),
        time in time_of_day(),
        interval in 1i64..=365,
        ahead in 1u64..=30,
    ) {
        let last_watered = today.checked_add_days(Days::new(ahead)).unwrap();
        let now = at(today, time);
        let days = days_until_watering(last_watered, interval, now).unwrap();
        prop_assert_eq!(days, interval + i64::try_from(ahead).unwrap());
        prop_assert_eq!(is_watering_due(last_watered, interval, now), Ok(false));
    }

    #[test]
    fn non_positive_interval_always_fails(
        last_watered in base_date(),
        today in base_date(),
        time in time_of_day(),
        interval in i64::MIN..=0,
    ) {
        let now = at(today, time);
        let expected = Err(InvalidIntervalError { interval });
        let error = InvalidIntervalError { interval };
        prop_assert_eq!(days_until_watering(last_watered, interval, now), expected);
        prop_assert_eq!(is_watering_due(last_watered, interval, now), Err(error));
        prop_assert_eq!(next_watering_date(last_watered, interval), Err(error));
    }

    #[test]
    fn due_on_next_watering_date(
        last_watered in base_date(),
        time in time_of_day(),
        interval in 1i64..=365,
    ) {
        let next = next_watering_date(last_watered, interval).unwrap();
        prop_assert_eq!(days_until_watering(last_watered, interval, at(next, time)), Ok(0));
        let day_before = next.pred_opt().unwrap();
        prop_assert_eq!(is_watering_due(last_watered, interval, at(day_before, time)), Ok(false));
    }
}

#[test]
fn fixed_boundaries() {
    let today = NaiveDate::from_ymd_opt(2023, 6, 10).unwrap();
    let now = at(today, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap();

    assert_eq!(days_until_watering(today, 7, now), Ok(7));
    assert_eq!(is_watering_due(today, 7, now), Ok(false));

    assert_eq!(days_until_watering(days_ago(7), 7, now), Ok(0));
    assert_eq!(is_watering_due(days_ago(7), 7, now), Ok(true));

    assert_eq!(days_until_watering(days_ago(10), 7, now), Ok(-3));
    assert_eq!(is_watering_due(days_ago(10), 7, now), Ok(true));

    let in_two_days = today.checked_add_days(Days::new(2)).unwrap();
    assert_eq!(days_until_watering(in_two_days, 7, now), Ok(9));
    assert_eq!(is_watering_due(in_two_days, 7, now), Ok(false));
}

use chrono::{Days, NaiveDate, NaiveDateTime};

/// Returned whenever a watering interval of zero days or fewer is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("watering interval must be at least one day, got {interval}")]
pub struct InvalidIntervalError {
    pub interval: i64,
}

/// Passes `watering_interval_days` through when it is at least one day.
pub fn validate_interval(watering_interval_days: i64) -> Result<i64, InvalidIntervalError> {
    if watering_interval_days > 0 {
        Ok(watering_interval_days)
    } else {
        Err(InvalidIntervalError {
            interval: watering_interval_days,
        })
    }
}

/// Whole calendar days between `last_watered` and the date of `now`.
///
/// Negative when `last_watered` is after `now`. The time of day in `now` plays
/// no part, so 23:00 one day to 01:00 the next is a single elapsed day.
pub fn elapsed_days(last_watered: NaiveDate, now: NaiveDateTime) -> i64 {
    now.date().signed_duration_since(last_watered).num_days()
}

/// Days left before the plant needs watering again.
///
/// Zero means the plant is due today, a negative value is the number of days
/// it is overdue. A `last_watered` date in the future is not clamped and
/// yields more days than the interval itself.
pub fn days_until_watering(
    last_watered: NaiveDate,
    watering_interval_days: i64,
    now: NaiveDateTime,
) -> Result<i64, InvalidIntervalError> {
    let interval = validate_interval(watering_interval_days)?;
    Ok(interval.saturating_sub(elapsed_days(last_watered, now)))
}

pub fn is_watering_due(
    last_watered: NaiveDate,
    watering_interval_days: i64,
    now: NaiveDateTime,
) -> Result<bool, InvalidIntervalError> {
    Ok(days_until_watering(last_watered, watering_interval_days, now)? <= 0)
}

/// The calendar date on which the plant next becomes due.
pub fn next_watering_date(
    last_watered: NaiveDate,
    watering_interval_days: i64,
) -> Result<NaiveDate, InvalidIntervalError> {
    let interval = validate_interval(watering_interval_days)?;
    // validate_interval guarantees a positive value
    let days = Days::new(interval.unsigned_abs());
    Ok(last_watered.checked_add_days(days).unwrap_or(NaiveDate::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringStatus {
    Upcoming { days: i64 },
    DueToday,
    Overdue { days: i64 },
}

impl WateringStatus {
    pub fn from_days_until(days_until: i64) -> Self {
        match days_until {
            d if d > 0 => WateringStatus::Upcoming { days: d },
            0 => WateringStatus::DueToday,
            d => WateringStatus::Overdue {
                days: d.saturating_neg(),
            },
        }
    }

    pub fn evaluate(
        last_watered: NaiveDate,
        watering_interval_days: i64,
        now: NaiveDateTime,
    ) -> Result<Self, InvalidIntervalError> {
        days_until_watering(last_watered, watering_interval_days, now).map(Self::from_days_until)
    }

    pub fn is_due(self) -> bool {
        !matches!(self, WateringStatus::Upcoming { .. })
    }
}

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" so that watering calculations can be pinned in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midday on `date`, far enough from midnight that the date is unambiguous.
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_hms_opt(12, 0, 0).unwrap_or_default(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::{Clock, FixedClock};

    #[test]
    fn fixed_clock_today() {
        let clock = FixedClock::new(NaiveDateTime::from_str("2023-06-10T23:30:00").unwrap());
        assert_eq!(clock.today(), NaiveDate::from_str("2023-06-10").unwrap());
    }

    #[test]
    fn fixed_clock_on_date() {
        let date = NaiveDate::from_str("2024-02-29").unwrap();
        let clock = FixedClock::on_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(
            clock.now(),
            NaiveDateTime::from_str("2024-02-29T12:00:00").unwrap()
        );
    }
}

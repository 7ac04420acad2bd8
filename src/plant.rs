use chrono::{NaiveDate, NaiveDateTime};

use crate::watering::{self, InvalidIntervalError, WateringStatus};

pub const DEFAULT_WATERING_INTERVAL_DAYS: i64 = 7;

pub type PlantId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: PlantId,
    pub nickname: String,
    pub plant_name: String,
    pub latin_name: Option<String>,
    pub location: Option<String>,
    pub last_watered_date: NaiveDate,
    pub watering_interval_days: i64,
    /// `None` for plants that are never fertilized.
    pub fertilizing_interval_days: Option<i64>,
    pub last_fertilized_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl Plant {
    pub fn days_until_watering(&self, now: NaiveDateTime) -> Result<i64, InvalidIntervalError> {
        watering::days_until_watering(self.last_watered_date, self.watering_interval_days, now)
    }

    pub fn is_watering_due(&self, now: NaiveDateTime) -> Result<bool, InvalidIntervalError> {
        watering::is_watering_due(self.last_watered_date, self.watering_interval_days, now)
    }

    pub fn next_watering_date(&self) -> Result<NaiveDate, InvalidIntervalError> {
        watering::next_watering_date(self.last_watered_date, self.watering_interval_days)
    }

    pub fn watering_status(
        &self,
        now: NaiveDateTime,
    ) -> Result<WateringStatus, InvalidIntervalError> {
        WateringStatus::evaluate(self.last_watered_date, self.watering_interval_days, now)
    }

    // A plant that has never been fertilized counts from the day it was added
    fn fertilizing_reference_date(&self) -> NaiveDate {
        self.last_fertilized_date
            .unwrap_or_else(|| self.created_at.date())
    }

    /// `None` when the plant has no fertilizing schedule.
    pub fn fertilizing_status(
        &self,
        now: NaiveDateTime,
    ) -> Option<Result<WateringStatus, InvalidIntervalError>> {
        self.fertilizing_interval_days.map(|interval| {
            WateringStatus::evaluate(self.fertilizing_reference_date(), interval, now)
        })
    }

    pub fn next_fertilizing_date(&self) -> Option<Result<NaiveDate, InvalidIntervalError>> {
        self.fertilizing_interval_days.map(|interval| {
            watering::next_watering_date(self.fertilizing_reference_date(), interval)
        })
    }
}

/// A plant that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlant {
    pub nickname: String,
    pub plant_name: String,
    pub latin_name: Option<String>,
    pub location: Option<String>,
    pub last_watered_date: NaiveDate,
    pub watering_interval_days: i64,
    pub fertilizing_interval_days: Option<i64>,
}

impl NewPlant {
    pub fn new(nickname: &str, plant_name: &str, last_watered_date: NaiveDate) -> Self {
        Self {
            nickname: nickname.to_owned(),
            plant_name: plant_name.to_owned(),
            latin_name: None,
            location: None,
            last_watered_date,
            watering_interval_days: DEFAULT_WATERING_INTERVAL_DAYS,
            fertilizing_interval_days: None,
        }
    }
}

/// Changes to apply to a stored plant. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantUpdate {
    pub nickname: Option<String>,
    pub plant_name: Option<String>,
    pub latin_name: Option<String>,
    pub location: Option<String>,
    pub watering_interval_days: Option<i64>,
    pub fertilizing_interval_days: Option<i64>,
}

impl PlantUpdate {
    pub fn is_empty(&self) -> bool {
        *self == PlantUpdate::default()
    }

    /// The plant as it would look after the update, intervals unchecked.
    pub fn apply_to(&self, plant: &Plant) -> Plant {
        Plant {
            nickname: self.nickname.clone().unwrap_or_else(|| plant.nickname.clone()),
            plant_name: self
                .plant_name
                .clone()
                .unwrap_or_else(|| plant.plant_name.clone()),
            latin_name: self.latin_name.clone().or_else(|| plant.latin_name.clone()),
            location: self.location.clone().or_else(|| plant.location.clone()),
            watering_interval_days: self
                .watering_interval_days
                .unwrap_or(plant.watering_interval_days),
            fertilizing_interval_days: self
                .fertilizing_interval_days
                .or(plant.fertilizing_interval_days),
            ..plant.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WateringEvent {
    pub id: i64,
    pub plant_id: PlantId,
    pub watered_on: NaiveDate,
    pub notes: Option<String>,
}

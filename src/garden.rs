use chrono::NaiveDateTime;
use log::warn;

use crate::{plant::Plant, watering::WateringStatus};

/// A plant paired with its watering state at one evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantStatus<'a> {
    pub plant: &'a Plant,
    pub days_until_watering: i64,
    pub status: WateringStatus,
}

impl PlantStatus<'_> {
    pub fn is_due(&self) -> bool {
        self.status.is_due()
    }
}

/// Status rows for `plants`, most urgent first.
///
/// Plants with an unusable watering interval are left out and logged.
pub fn statuses(plants: &[Plant], now: NaiveDateTime) -> Vec<PlantStatus<'_>> {
    let mut rows: Vec<PlantStatus> = plants
        .iter()
        .filter_map(|plant| match plant.days_until_watering(now) {
            Ok(days_until_watering) => Some(PlantStatus {
                plant,
                days_until_watering,
                status: WateringStatus::from_days_until(days_until_watering),
            }),
            Err(err) => {
                warn!("Skipping plant {} ({}): {}", plant.id, plant.nickname, err);
                None
            }
        })
        .collect();

    rows.sort_by_key(|row| (row.days_until_watering, row.plant.id));
    rows
}

/// The plants that need water today, including any that are overdue.
pub fn due_today(plants: &[Plant], now: NaiveDateTime) -> Vec<PlantStatus<'_>> {
    statuses(plants, now)
        .into_iter()
        .filter(PlantStatus::is_due)
        .collect()
}

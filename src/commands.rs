use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;

use crate::{
    clock::Clock,
    garden::{self, PlantStatus},
    localize::{localize, Key, Locale},
    plant::{NewPlant, Plant, PlantId, PlantUpdate},
    plantdb::{PlantNotFoundError, PlantRepository},
    watering::WateringStatus,
};

/// Runs user-facing operations against a repository and renders the results
/// in the configured locale.
pub struct Commands<'a, TRepo>
where
    TRepo: PlantRepository,
{
    repo: &'a TRepo,
    clock: &'a dyn Clock,
    locale: Locale,
}

impl<'a, TRepo> Commands<'a, TRepo>
where
    TRepo: PlantRepository,
{
    pub fn new(repo: &'a TRepo, clock: &'a dyn Clock, locale: Locale) -> Self {
        Self {
            repo,
            clock,
            locale,
        }
    }

    fn t(&self, key: Key) -> &'static str {
        localize(key, self.locale)
    }

    // `until` and `due` pick the wording, so fertilizing reuses the watering layout
    fn status_text(&self, status: WateringStatus, until: Key, due: Key) -> String {
        match status {
            WateringStatus::Upcoming { days } => format!("{}: {}", self.t(until), days),
            WateringStatus::DueToday => self.t(due).to_owned(),
            WateringStatus::Overdue { days } => {
                format!("{} ({}: {})", self.t(due), self.t(Key::DaysOverdue), days)
            }
        }
    }

    fn watering_text(&self, status: WateringStatus) -> String {
        self.status_text(status, Key::DaysUntilWatering, Key::WateringDue)
    }

    fn write_row(&self, out: &mut impl Write, row: &PlantStatus) -> Result<()> {
        let plant = row.plant;
        let marker = if row.is_due() { "*" } else { " " };
        write!(
            out,
            "{} #{} {} ({})",
            marker, plant.id, plant.nickname, plant.plant_name
        )?;
        if let Some(location) = &plant.location {
            write!(out, " - {location}")?;
        }
        writeln!(out)?;
        writeln!(out, "     {}", self.watering_text(row.status))?;
        Ok(())
    }

    pub fn add(&self, out: &mut impl Write, plant: &NewPlant) -> Result<Plant> {
        let added = self.repo.add_plant(plant, self.clock.now())?;
        writeln!(out, "{}: #{} {}", self.t(Key::PlantAdded), added.id, added.nickname)?;
        Ok(added)
    }

    pub fn list(&self, out: &mut impl Write) -> Result<()> {
        let plants = self.repo.list_plants()?;
        writeln!(out, "{}", self.t(Key::MyGarden))?;
        if plants.is_empty() {
            writeln!(out, "{}", self.t(Key::NoPlants))?;
            return Ok(());
        }

        for row in garden::statuses(&plants, self.clock.now()) {
            self.write_row(out, &row)?;
        }
        Ok(())
    }

    pub fn due(&self, out: &mut impl Write) -> Result<usize> {
        let plants = self.repo.list_plants()?;
        let due = garden::due_today(&plants, self.clock.now());
        debug!("{} of {} plants due", due.len(), plants.len());

        writeln!(out, "{}", self.t(Key::WaterToday))?;
        if due.is_empty() {
            writeln!(out, "{}", self.t(Key::NothingToWater))?;
        }
        for row in &due {
            self.write_row(out, row)?;
        }
        Ok(due.len())
    }

    pub fn show(&self, out: &mut impl Write, id: PlantId) -> Result<()> {
        let plant = self.require_plant(id)?;
        let status = plant
            .watering_status(self.clock.now())
            .with_context(|| format!("Plant {id} has an unusable watering schedule"))?;
        let next = plant.next_watering_date()?;

        writeln!(out, "{}", self.t(Key::PlantDetails))?;
        writeln!(out, "  {}: {}", self.t(Key::Nickname), plant.nickname)?;
        write!(out, "  {}: {}", self.t(Key::Species), plant.plant_name)?;
        if let Some(latin) = &plant.latin_name {
            write!(out, " ({latin})")?;
        }
        writeln!(out)?;
        if let Some(location) = &plant.location {
            writeln!(out, "  {}: {location}", self.t(Key::Location))?;
        }
        writeln!(out, "{}", self.t(Key::WateringSchedule))?;
        writeln!(
            out,
            "  {}: {} {}",
            self.t(Key::WateringInterval),
            plant.watering_interval_days,
            self.t(Key::Days)
        )?;
        writeln!(out, "  {}: {}", self.t(Key::LastWatered), plant.last_watered_date)?;
        writeln!(out, "  {}: {next}", self.t(Key::NextWatering))?;
        writeln!(out, "  {}", self.watering_text(status))?;

        self.show_fertilizing(out, &plant)
    }

    fn show_fertilizing(&self, out: &mut impl Write, plant: &Plant) -> Result<()> {
        let (Some(interval), Some(status), Some(next)) = (
            plant.fertilizing_interval_days,
            plant.fertilizing_status(self.clock.now()),
            plant.next_fertilizing_date(),
        ) else {
            return Ok(());
        };
        let id = plant.id;
        let unusable = || format!("Plant {id} has an unusable fertilizing schedule");
        let status = status.with_context(unusable)?;
        let next = next.with_context(unusable)?;

        writeln!(out, "{}", self.t(Key::FertilizingSchedule))?;
        writeln!(
            out,
            "  {}: {} {}",
            self.t(Key::FertilizingInterval),
            interval,
            self.t(Key::Days)
        )?;
        match plant.last_fertilized_date {
            Some(date) => writeln!(out, "  {}: {date}", self.t(Key::LastFertilized))?,
            None => writeln!(out, "  {}: {}", self.t(Key::LastFertilized), self.t(Key::Never))?,
        }
        writeln!(out, "  {}: {next}", self.t(Key::NextFertilizing))?;
        writeln!(
            out,
            "  {}",
            self.status_text(status, Key::DaysUntilFertilizing, Key::FertilizingDue)
        )?;
        Ok(())
    }

    /// Records a watering, today unless `on` says otherwise.
    pub fn water(
        &self,
        out: &mut impl Write,
        id: PlantId,
        on: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<()> {
        let watered_on = on.unwrap_or_else(|| self.clock.today());
        let event = self.repo.record_watering(id, watered_on, notes)?;
        writeln!(out, "{}: #{} {}", self.t(Key::Watered), event.plant_id, event.watered_on)?;
        Ok(())
    }

    /// Records a fertilizing, today unless `on` says otherwise.
    pub fn fertilize(
        &self,
        out: &mut impl Write,
        id: PlantId,
        on: Option<NaiveDate>,
    ) -> Result<()> {
        let fertilized_on = on.unwrap_or_else(|| self.clock.today());
        let plant = self.repo.record_fertilizing(id, fertilized_on)?;
        writeln!(out, "{}: #{} {fertilized_on}", self.t(Key::Fertilized), plant.id)?;
        Ok(())
    }

    pub fn history(&self, out: &mut impl Write, id: PlantId) -> Result<()> {
        let plant = self.require_plant(id)?;
        let events = self.repo.watering_history(id)?;

        writeln!(out, "{}: #{} {}", self.t(Key::WateringHistory), plant.id, plant.nickname)?;
        if events.is_empty() {
            writeln!(out, "  {}", self.t(Key::NoWateringHistory))?;
        }
        for event in events {
            match event.notes {
                Some(notes) => writeln!(out, "  {} {notes}", event.watered_on)?,
                None => writeln!(out, "  {}", event.watered_on)?,
            }
        }
        Ok(())
    }

    pub fn edit(&self, out: &mut impl Write, id: PlantId, update: &PlantUpdate) -> Result<Plant> {
        let plant = self.repo.update_plant(id, update)?;
        writeln!(out, "{}: #{} {}", self.t(Key::PlantUpdated), plant.id, plant.nickname)?;
        Ok(plant)
    }

    pub fn set_interval(&self, out: &mut impl Write, id: PlantId, days: i64) -> Result<()> {
        let update = PlantUpdate {
            watering_interval_days: Some(days),
            ..PlantUpdate::default()
        };
        let plant = self.repo.update_plant(id, &update)?;
        writeln!(
            out,
            "{}: #{} {} {}",
            self.t(Key::WateringInterval),
            plant.id,
            plant.watering_interval_days,
            self.t(Key::Days)
        )?;
        Ok(())
    }

    pub fn remove(&self, out: &mut impl Write, id: PlantId) -> Result<()> {
        self.repo.remove_plant(id)?;
        writeln!(out, "{}: #{id}", self.t(Key::PlantRemoved))?;
        Ok(())
    }

    fn require_plant(&self, id: PlantId) -> Result<Plant> {
        self.repo
            .get_plant(id)?
            .ok_or_else(|| PlantNotFoundError(id).into())
    }
}

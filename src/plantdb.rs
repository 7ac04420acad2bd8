use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use rusqlite::{params, OptionalExtension, Row};

use crate::{
    db::{
        fmt_naivedate_for_sqlite, fmt_naivedatetime_for_sqlite, parse_naivedate_from_sqlite,
        parse_naivedatetime_from_sqlite, Db, Migration,
    },
    plant::{NewPlant, Plant, PlantId, PlantUpdate, WateringEvent},
    watering::validate_interval,
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("no plant with id {0}")]
pub struct PlantNotFoundError(pub PlantId);

/// Storage for plants and their watering history.
pub trait PlantRepository {
    fn list_plants(&self) -> Result<Vec<Plant>>;
    fn get_plant(&self, id: PlantId) -> Result<Option<Plant>>;
    fn add_plant(&self, plant: &NewPlant, now: NaiveDateTime) -> Result<Plant>;
    fn update_plant(&self, id: PlantId, update: &PlantUpdate) -> Result<Plant>;
    fn remove_plant(&self, id: PlantId) -> Result<()>;
    /// Appends to the history. The last-watered date only moves forward, so a
    /// backfilled watering never makes a plant look thirstier than it is.
    fn record_watering(
        &self,
        id: PlantId,
        watered_on: NaiveDate,
        notes: Option<&str>,
    ) -> Result<WateringEvent>;
    /// Newest first.
    fn watering_history(&self, id: PlantId) -> Result<Vec<WateringEvent>>;
    /// Moves the last-fertilized date forward to `fertilized_on`.
    fn record_fertilizing(&self, id: PlantId, fertilized_on: NaiveDate) -> Result<Plant>;
}

pub(crate) const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "001",
        sql: "CREATE TABLE plants (
                  id                      INTEGER PRIMARY KEY
                , nickname                TEXT NOT NULL
                , plant_name              TEXT NOT NULL
                , latin_name              TEXT
                , location                TEXT
                , last_watered_date       TEXT NOT NULL
                , watering_interval_days  INTEGER NOT NULL DEFAULT 7
                , created_at              TEXT NOT NULL
                , is_deleted              INTEGER NOT NULL DEFAULT 0
            )",
    },
    Migration {
        id: "002",
        sql: "CREATE TABLE watering_history (
                  id          INTEGER PRIMARY KEY
                , plant_id    INTEGER NOT NULL REFERENCES plants (id)
                , watered_on  TEXT NOT NULL
                , notes       TEXT
            )",
    },
    Migration {
        id: "003",
        sql: "ALTER TABLE plants ADD COLUMN fertilizing_interval_days INTEGER",
    },
    Migration {
        id: "004",
        sql: "ALTER TABLE plants ADD COLUMN last_fertilized_date TEXT",
    },
];

const PLANT_COLUMNS: &str = "
      id
    , nickname
    , plant_name
    , latin_name
    , location
    , last_watered_date
    , watering_interval_days
    , fertilizing_interval_days
    , last_fertilized_date
    , created_at
";

type PlantRow = (
    PlantId,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    i64,
    Option<i64>,
    Option<String>,
    String,
);

fn read_plant_row(row: &Row) -> rusqlite::Result<PlantRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn plant_from_row(row: PlantRow) -> Result<Plant> {
    let (
        id,
        nickname,
        plant_name,
        latin_name,
        location,
        last_watered,
        watering_interval_days,
        fertilizing_interval_days,
        last_fertilized,
        created,
    ) = row;
    Ok(Plant {
        id,
        nickname,
        plant_name,
        latin_name,
        location,
        last_watered_date: parse_naivedate_from_sqlite(&last_watered)
            .with_context(|| format!("Bad last_watered_date for plant {id}"))?,
        watering_interval_days,
        fertilizing_interval_days,
        last_fertilized_date: last_fertilized
            .as_deref()
            .map(parse_naivedate_from_sqlite)
            .transpose()
            .with_context(|| format!("Bad last_fertilized_date for plant {id}"))?,
        created_at: parse_naivedatetime_from_sqlite(&created)
            .with_context(|| format!("Bad created_at for plant {id}"))?,
    })
}

fn event_from_row(row: (i64, PlantId, String, Option<String>)) -> Result<WateringEvent> {
    let (id, plant_id, watered_on, notes) = row;
    Ok(WateringEvent {
        id,
        plant_id,
        watered_on: parse_naivedate_from_sqlite(&watered_on)
            .with_context(|| format!("Bad watered_on for watering event {id}"))?,
        notes,
    })
}

pub struct PlantDb {
    db: Db,
}

impl PlantDb {
    pub fn new(path: String) -> Self {
        Self { db: Db::new(path) }
    }

    pub fn run_migrations(&self) -> Result<()> {
        self.db.upgrade(MIGRATIONS)
    }

    fn require_plant(&self, id: PlantId) -> Result<Plant> {
        self.get_plant(id)?.ok_or_else(|| PlantNotFoundError(id).into())
    }
}

impl PlantRepository for PlantDb {
    fn list_plants(&self) -> Result<Vec<Plant>> {
        let conn = self.db.new_conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PLANT_COLUMNS} FROM plants WHERE is_deleted = 0 ORDER BY id"
            ))
            .context("Failed to prepare plant listing")?;
        let rows = stmt
            .query_map((), read_plant_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list plants")?;

        rows.into_iter().map(plant_from_row).collect()
    }

    fn get_plant(&self, id: PlantId) -> Result<Option<Plant>> {
        let conn = self.db.new_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1 AND is_deleted = 0"),
                [id],
                read_plant_row,
            )
            .optional()
            .with_context(|| format!("Failed to load plant {id}"))?;

        row.map(plant_from_row).transpose()
    }

    fn add_plant(&self, plant: &NewPlant, now: NaiveDateTime) -> Result<Plant> {
        validate_interval(plant.watering_interval_days)?;
        plant
            .fertilizing_interval_days
            .map(validate_interval)
            .transpose()?;

        let conn = self.db.new_conn()?;
        conn.execute(
            "
                INSERT INTO plants (
                    nickname
                  , plant_name
                  , latin_name
                  , location
                  , last_watered_date
                  , watering_interval_days
                  , fertilizing_interval_days
                  , created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                plant.nickname,
                plant.plant_name,
                plant.latin_name,
                plant.location,
                fmt_naivedate_for_sqlite(&plant.last_watered_date),
                plant.watering_interval_days,
                plant.fertilizing_interval_days,
                fmt_naivedatetime_for_sqlite(&now),
            ],
        )
        .context("Failed to insert plant")?;
        let id = conn.last_insert_rowid();
        info!("Added plant {} ({})", id, plant.nickname);

        Ok(Plant {
            id,
            nickname: plant.nickname.clone(),
            plant_name: plant.plant_name.clone(),
            latin_name: plant.latin_name.clone(),
            location: plant.location.clone(),
            last_watered_date: plant.last_watered_date,
            watering_interval_days: plant.watering_interval_days,
            fertilizing_interval_days: plant.fertilizing_interval_days,
            last_fertilized_date: None,
            created_at: now,
        })
    }

    fn update_plant(&self, id: PlantId, update: &PlantUpdate) -> Result<Plant> {
        let updated = update.apply_to(&self.require_plant(id)?);
        validate_interval(updated.watering_interval_days)?;
        updated
            .fertilizing_interval_days
            .map(validate_interval)
            .transpose()?;

        let conn = self.db.new_conn()?;
        let changed = conn
            .execute(
                "
                    UPDATE plants
                    SET nickname = ?1
                      , plant_name = ?2
                      , latin_name = ?3
                      , location = ?4
                      , watering_interval_days = ?5
                      , fertilizing_interval_days = ?6
                    WHERE id = ?7 AND is_deleted = 0
                ",
                params![
                    updated.nickname,
                    updated.plant_name,
                    updated.latin_name,
                    updated.location,
                    updated.watering_interval_days,
                    updated.fertilizing_interval_days,
                    id,
                ],
            )
            .with_context(|| format!("Failed to update plant {id}"))?;
        if changed == 0 {
            return Err(PlantNotFoundError(id).into());
        }
        debug!("Updated plant {}: {:?}", id, update);

        Ok(updated)
    }

    fn remove_plant(&self, id: PlantId) -> Result<()> {
        let conn = self.db.new_conn()?;
        let updated = conn
            .execute(
                "UPDATE plants SET is_deleted = 1 WHERE id = ?1 AND is_deleted = 0",
                [id],
            )
            .with_context(|| format!("Failed to remove plant {id}"))?;
        if updated == 0 {
            return Err(PlantNotFoundError(id).into());
        }
        info!("Removed plant {}", id);

        Ok(())
    }

    fn record_watering(
        &self,
        id: PlantId,
        watered_on: NaiveDate,
        notes: Option<&str>,
    ) -> Result<WateringEvent> {
        let mut conn = self.db.new_conn()?;
        let tx = conn.transaction()?;
        let encoded = fmt_naivedate_for_sqlite(&watered_on);

        let updated = tx
            .execute(
                "
                    UPDATE plants
                    SET last_watered_date = MAX(last_watered_date, ?1)
                    WHERE id = ?2 AND is_deleted = 0
                ",
                params![encoded, id],
            )
            .with_context(|| format!("Failed to update last watered date for plant {id}"))?;
        if updated == 0 {
            return Err(PlantNotFoundError(id).into());
        }

        tx.execute(
            "
                INSERT INTO watering_history (plant_id, watered_on, notes)
                VALUES (?1, ?2, ?3)
            ",
            params![id, encoded, notes],
        )
        .context("Failed to insert watering event")?;
        let event_id = tx.last_insert_rowid();
        tx.commit().context("Failed to commit watering")?;
        info!("Plant {} watered on {}", id, watered_on);

        Ok(WateringEvent {
            id: event_id,
            plant_id: id,
            watered_on,
            notes: notes.map(str::to_owned),
        })
    }

    fn watering_history(&self, id: PlantId) -> Result<Vec<WateringEvent>> {
        self.require_plant(id)?;

        let conn = self.db.new_conn()?;
        let mut stmt = conn.prepare(
            "
                SELECT
                      id
                    , plant_id
                    , watered_on
                    , notes
                FROM watering_history
                WHERE plant_id = ?1
                ORDER BY watered_on DESC, id DESC
            ",
        )?;
        let rows = stmt
            .query_map([id], |row| {
                Ok((
                    row.get::<usize, i64>(0)?,
                    row.get::<usize, PlantId>(1)?,
                    row.get::<usize, String>(2)?,
                    row.get::<usize, Option<String>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to load watering history for plant {id}"))?;

        rows.into_iter().map(event_from_row).collect()
    }

    fn record_fertilizing(&self, id: PlantId, fertilized_on: NaiveDate) -> Result<Plant> {
        let conn = self.db.new_conn()?;
        let updated = conn
            .execute(
                "
                    UPDATE plants
                    SET last_fertilized_date = MAX(COALESCE(last_fertilized_date, ?1), ?1)
                    WHERE id = ?2 AND is_deleted = 0
                ",
                params![fmt_naivedate_for_sqlite(&fertilized_on), id],
            )
            .with_context(|| format!("Failed to update last fertilized date for plant {id}"))?;
        if updated == 0 {
            return Err(PlantNotFoundError(id).into());
        }
        info!("Plant {} fertilized on {}", id, fertilized_on);

        self.require_plant(id)
    }
}

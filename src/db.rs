use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("migration ID {0} in database doesn't appear in migration history")]
pub struct UnknownMigrationError(pub String);

static SQLITE_DATE_FMT: &str = "%Y-%m-%d";
static SQLITE_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

// A trait to make it easier to inject temporary database files when running
// tests.
trait DbFilePath {
    fn path(&self) -> String;
}

impl DbFilePath for String {
    fn path(&self) -> String {
        self.clone()
    }
}

pub struct Migration<'a> {
    pub id: &'a str,
    pub sql: &'a str,
}

pub struct Db {
    file_path: Box<dyn DbFilePath + Send + Sync + 'static>,
}

impl Db {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path: Box::new(file_path),
        }
    }

    pub fn upgrade(&self, migrations: &[Migration]) -> Result<()> {
        let migrations_to_run = self.calculate_migrations_to_run(migrations)?;
        self.run_migrations(migrations_to_run)?;

        Ok(())
    }

    fn calculate_migrations_to_run<'a, 'b>(
        &self,
        migrations: &'a [Migration<'b>],
    ) -> Result<&'a [Migration<'b>]> {
        let conn = self.new_conn()?;

        conn.execute(
            "
                CREATE TABLE IF NOT EXISTS migrations (
                    id             INTEGER PRIMARY KEY
                    , migration_id TEXT NOT NULL
                    , created_on   DEFAULT CURRENT_TIMESTAMP
                )
            ",
            (),
        )
        .context("Failed to create migrations table")?;

        let current_migration = conn
            .query_row(
                "
                    SELECT migration_id
                    FROM migrations
                    ORDER BY id DESC
                    LIMIT 1
                ",
                (),
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        match current_migration {
            Some(current_migration_id) => {
                debug!("Current DB migration: {}", current_migration_id);
                migrations
                    .iter()
                    .position(|m| m.id == current_migration_id)
                    .map(|idx| &migrations[idx + 1..])
                    .ok_or(UnknownMigrationError(current_migration_id).into())
            }
            None => {
                debug!("Current DB migration: None");
                Ok(migrations)
            }
        }
    }

    pub fn new_conn(&self) -> Result<Connection> {
        let conn = Connection::open(self.file_path.path())
            .context("Failed to open new sqlite connection")?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .context("Failed to enable foreign keys")?;
        Ok(conn)
    }

    fn run_migrations(&self, migrations: &[Migration]) -> Result<()> {
        let mut conn = self.new_conn()?;
        for migration in migrations {
            info!("Running migration {}", migration.id);
            // Schema change and its bookkeeping row land together or not at all
            let tx = conn.transaction()?;
            tx.execute(migration.sql, ())?;
            tx.execute(
                "
                    INSERT INTO migrations (migration_id)
                    VALUES (?1)
                ",
                [&migration.id],
            )?;
            tx.commit()?;
        }

        Ok(())
    }
}

pub fn parse_naivedate_from_sqlite(encoded: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(encoded, SQLITE_DATE_FMT)
}

pub fn fmt_naivedate_for_sqlite(date: &NaiveDate) -> String {
    date.format(SQLITE_DATE_FMT).to_string()
}

pub fn parse_naivedatetime_from_sqlite(
    encoded: &str,
) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(encoded, SQLITE_DATETIME_FMT)
}

pub fn fmt_naivedatetime_for_sqlite(datetime: &NaiveDateTime) -> String {
    datetime.format(SQLITE_DATETIME_FMT).to_string()
}

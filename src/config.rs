use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;

use crate::{
    clock::{Clock, FixedClock, SystemClock},
    localize::Locale,
};

pub const DEFAULT_DB_PATH: &str = "./plants.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub locale: Locale,
    /// Evaluate everything as if it were this date instead of today.
    pub today: Option<NaiveDate>,
}

impl Config {
    /// `locale` is an explicit choice and must be supported. `lang` is the
    /// ambient `LANG` value and only ever nudges the default.
    pub fn resolve(
        db_path: Option<String>,
        locale: Option<&str>,
        lang: Option<&str>,
        today: Option<NaiveDate>,
    ) -> Result<Self> {
        let locale = match (locale, lang) {
            (Some(tag), _) => tag.parse::<Locale>().context("Invalid --locale")?,
            (None, Some(lang)) => Locale::negotiate(lang),
            (None, None) => Locale::default(),
        };
        let config = Self {
            db_path: db_path.unwrap_or_else(|| DEFAULT_DB_PATH.to_owned()),
            locale,
            today,
        };
        debug!("Resolved config {:?}", config);

        Ok(config)
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock::on_date(date)),
            None => Box::new(SystemClock),
        }
    }
}

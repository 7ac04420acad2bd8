#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod garden;
pub mod localize;
pub mod plant;
pub mod plantdb;
pub mod watering;

pub use watering::{days_until_watering, is_watering_due, InvalidIntervalError};

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod cli;

use std::{env, io, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error};
use plantcare::{
    commands::Commands,
    config::Config,
    plant::NewPlant,
    plantdb::PlantDb,
};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match initialise(&cli).and_then(|(config, db)| run(&config, &db, cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn initialise(cli: &Cli) -> Result<(Config, PlantDb)> {
    let lang = env::var("LANG").ok();
    let config = Config::resolve(
        cli.db.clone(),
        cli.locale.as_deref(),
        lang.as_deref(),
        cli.today,
    )?;

    let db = PlantDb::new(config.db_path.clone());
    db.run_migrations()
        .with_context(|| format!("Failed to run migrations on {}", config.db_path))?;
    debug!("Opened garden at {}", config.db_path);

    Ok((config, db))
}

fn run(config: &Config, db: &PlantDb, command: Command) -> Result<()> {
    let clock = config.clock();
    let commands = Commands::new(db, clock.as_ref(), config.locale);
    let mut out = io::stdout().lock();

    match command {
        Command::Add(args) => {
            let plant = NewPlant {
                nickname: args.nickname,
                plant_name: args.species,
                latin_name: args.latin_name,
                location: args.location,
                last_watered_date: args.last_watered.unwrap_or_else(|| clock.today()),
                watering_interval_days: args.interval,
                fertilizing_interval_days: args.fertilize_every,
            };
            commands.add(&mut out, &plant)?;
        }
        Command::List => commands.list(&mut out)?,
        Command::Due => {
            commands.due(&mut out)?;
        }
        Command::Show { id } => commands.show(&mut out, id)?,
        Command::Water { id, on, notes } => {
            commands.water(&mut out, id, on, notes.as_deref())?;
        }
        Command::Fertilize { id, on } => commands.fertilize(&mut out, id, on)?,
        Command::Edit(args) => {
            let id = args.id;
            commands.edit(&mut out, id, &args.into())?;
        }
        Command::History { id } => commands.history(&mut out, id)?,
        Command::SetInterval { id, days } => commands.set_interval(&mut out, id, days)?,
        Command::Remove { id } => commands.remove(&mut out, id)?,
    }

    Ok(())
}

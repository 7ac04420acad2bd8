use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use plantcare::plant::{PlantUpdate, DEFAULT_WATERING_INTERVAL_DAYS};

/// Keep track of when your plants need watering.
#[derive(Parser)]
#[command(name = "plantcare", version)]
pub(crate) struct Cli {
    /// SQLite file holding the garden.
    #[arg(long, global = true, env = "PLANTCARE_DB")]
    pub(crate) db: Option<String>,

    /// Output language (en, ar). Falls back to LANG.
    #[arg(long, global = true, env = "PLANTCARE_LOCALE")]
    pub(crate) locale: Option<String>,

    /// Evaluate as if today were this date (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub(crate) today: Option<NaiveDate>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Add a plant to the garden.
    Add(AddArgs),
    /// List every plant with its watering state.
    List,
    /// List the plants that need water today.
    Due,
    /// Show one plant in detail.
    Show { id: i64 },
    /// Record that a plant was watered.
    Water {
        id: i64,
        /// Date of the watering, defaults to today.
        #[arg(long)]
        on: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record that a plant was fertilized.
    Fertilize {
        id: i64,
        /// Date of the fertilizing, defaults to today.
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Change a plant's details. Only the given fields change.
    Edit(EditArgs),
    /// Show the watering history of a plant, newest first.
    History { id: i64 },
    /// Change how often a plant should be watered.
    SetInterval {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Remove a plant from the garden.
    Remove { id: i64 },
}

#[derive(clap::Args)]
pub(crate) struct AddArgs {
    pub(crate) nickname: String,

    /// Common name of the species.
    #[arg(long)]
    pub(crate) species: String,

    #[arg(long)]
    pub(crate) latin_name: Option<String>,

    #[arg(long)]
    pub(crate) location: Option<String>,

    /// Days between waterings.
    #[arg(
        long,
        default_value_t = DEFAULT_WATERING_INTERVAL_DAYS,
        allow_negative_numbers = true
    )]
    pub(crate) interval: i64,

    /// Days between fertilizings. Not fertilized when omitted.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) fertilize_every: Option<i64>,

    /// Defaults to today.
    #[arg(long)]
    pub(crate) last_watered: Option<NaiveDate>,
}

#[derive(clap::Args)]
pub(crate) struct EditArgs {
    pub(crate) id: i64,

    #[arg(long)]
    pub(crate) nickname: Option<String>,

    #[arg(long)]
    pub(crate) species: Option<String>,

    #[arg(long)]
    pub(crate) latin_name: Option<String>,

    #[arg(long)]
    pub(crate) location: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub(crate) interval: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub(crate) fertilize_every: Option<i64>,
}

impl From<EditArgs> for PlantUpdate {
    fn from(args: EditArgs) -> Self {
        PlantUpdate {
            nickname: args.nickname,
            plant_name: args.species,
            latin_name: args.latin_name,
            location: args.location,
            watering_interval_days: args.interval,
            fertilizing_interval_days: args.fertilize_every,
        }
    }
}

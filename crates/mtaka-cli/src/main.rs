mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mtaka",
    version,
    about = "Analytics for household waste-collection records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the records come from and how to read them.
#[derive(Args, Clone)]
pub struct DataArgs {
    /// Path to the collection records (JSON array or XLSX)
    pub input_file: PathBuf,

    /// Predefined dataset profile: crichow (default), crichow-mixed
    #[arg(short, long, value_name = "NAME", conflicts_with = "profile_file")]
    pub profile: Option<String>,

    /// Custom JSON profile file
    #[arg(long, value_name = "FILE")]
    pub profile_file: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,
}

/// Dashboard filter selections. Empty selections mean "all".
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Group display name (repeatable)
    #[arg(short, long = "group", value_name = "NAME")]
    pub groups: Vec<String>,

    /// Household name (repeatable)
    #[arg(long = "household", value_name = "NAME")]
    pub households: Vec<String>,

    /// Material to report: hdpe, pet, pp, paper, metal, glass (repeatable)
    #[arg(short, long = "material", value_name = "NAME")]
    pub materials: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline KPIs plus every breakdown for the selection
    Summary {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Per-group totals, heaviest first
    Groups {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Recyclable material totals
    Materials {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Weekly per-household averages for domestic and business points
    Categories {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Values available to filter on, and the dataset's date span
    Options {
        #[command(flatten)]
        data: DataArgs,

        /// Only list households of these groups (display names)
        #[arg(short, long = "group", value_name = "NAME")]
        groups: Vec<String>,
    },
    /// Scale observed per-household rates to a target population (whole dataset)
    Extrapolate {
        #[command(flatten)]
        data: DataArgs,

        /// Target number of households (default from profile)
        #[arg(long)]
        households: Option<usize>,

        /// Target number of weeks (default from profile)
        #[arg(long)]
        weeks: Option<usize>,

        /// Target number of groups, informational (default from profile)
        #[arg(long = "groups")]
        groups: Option<usize>,
    },
    /// Monthly totals and a six-month trend forecast
    Forecast {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Load and clean the records, reporting what was dropped
    Clean {
        #[command(flatten)]
        data: DataArgs,

        /// Write the cleaned records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Manage and inspect dataset profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Explain a profile in plain language
    Explain {
        /// Preset name (e.g., "crichow")
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { data, filter } => commands::summary::run(&data, &filter),
        Commands::Groups { data, filter } => commands::groups::run(&data, &filter),
        Commands::Materials { data, filter } => commands::materials::run(&data, &filter),
        Commands::Categories { data, filter } => commands::categories::run(&data, &filter),
        Commands::Options { data, groups } => commands::options::run(&data, &groups),
        Commands::Extrapolate {
            data,
            households,
            weeks,
            groups,
        } => commands::extrapolate::run(&data, households, weeks, groups),
        Commands::Forecast { data, filter } => commands::forecast::run(&data, &filter),
        Commands::Clean { data, out } => commands::clean::run(&data, out),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { preset } => commands::profiles::explain(&preset),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

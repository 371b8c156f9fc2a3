use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{parse_date, Context};

#[derive(Parser)]
#[command(name = "fittrack-cli", version, about = "FitTrack CLI")]
struct Cli {
    /// User profile to act on (default: user.default_user_id)
    #[arg(long, global = true)]
    user: Option<i64>,
    /// Treat this day as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    date: Option<NaiveDate>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking and streak statistics
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Daily water intake
    Water {
        #[command(subcommand)]
        action: commands::water::WaterAction,
    },
    /// Guided workouts, lifetime stats and fitness goals
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Weekly meal and exercise plan
    Meal {
        #[command(subcommand)]
        action: commands::meal::MealAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => {
            commands::habit::run(action, &Context::new(cli.user, cli.date))
        }
        Commands::Water { action } => {
            commands::water::run(action, &Context::new(cli.user, cli.date))
        }
        Commands::Workout { action } => {
            commands::workout::run(action, &Context::new(cli.user, cli.date))
        }
        Commands::Meal { action } => {
            commands::meal::run(action, &Context::new(cli.user, cli.date))
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fittrack-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

//! CLI frontend for the GURPS rules engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use gr_mechanics::Operation;

#[derive(Parser)]
#[command(
    name = "gr",
    about = "GURPS dice, damage, range, and automatic-fire calculator",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON rules configuration (range table, metric conversion, dice options)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice pool, e.g. "3d+2"
    Roll {
        /// Dice notation
        #[arg(allow_hyphen_values = true)]
        dice: String,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Trade large modifiers for extra dice before rolling
        #[arg(short, long)]
        extra_dice: bool,
    },

    /// Add two dice pools
    Add {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        left: String,

        /// Right operand
        #[arg(allow_hyphen_values = true)]
        right: String,

        /// Require both pools to use the same die
        #[arg(long)]
        strict: bool,
    },

    /// Subtract one dice pool from another
    Sub {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        left: String,

        /// Right operand
        #[arg(allow_hyphen_values = true)]
        right: String,

        /// Require both pools to use the same die
        #[arg(long)]
        strict: bool,
    },

    /// Put six-sided damage dice in canonical form
    Damage {
        /// Damage notation, e.g. "1d+3"
        #[arg(allow_hyphen_values = true)]
        dice: String,

        /// Flat bonus to add before normalizing
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        plus: i32,
    },

    /// Show thrust, swing, and basic lift for Strength scores
    Strength {
        /// One or more Strength scores
        #[arg(required = true)]
        scores: Vec<i32>,
    },

    /// Speed/range penalty for a distance, e.g. "30", "50 ft", "2 km"
    Range {
        /// Distance (yards if no unit)
        distance: String,
    },

    /// Size modifier for a length, e.g. "6 ft"
    Size {
        /// Longest dimension (yards if no unit)
        length: String,
    },

    /// Hits scored by a burst of automatic fire
    Fire {
        /// Rate of fire, e.g. "10" or "3x9"
        #[arg(long)]
        rof: String,

        /// Weapon recoil
        #[arg(long)]
        recoil: i32,

        /// Shots requested (defaults to one)
        #[arg(long)]
        shots: Option<i32>,

        /// Margin of success on the attack roll
        #[arg(long, allow_hyphen_values = true)]
        margin: i32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Roll {
                dice,
                seed,
                extra_dice,
            } => commands::roll::run(&config, &dice, seed, extra_dice),
            Commands::Add {
                left,
                right,
                strict,
            } => commands::arithmetic::run(&config, &left, &right, Operation::Add, strict),
            Commands::Sub {
                left,
                right,
                strict,
            } => commands::arithmetic::run(&config, &left, &right, Operation::Subtract, strict),
            Commands::Damage { dice, plus } => commands::damage::run(&dice, plus),
            Commands::Strength { scores } => commands::strength::run(&scores),
            Commands::Range { distance } => commands::range::run_range(&config, &distance),
            Commands::Size { length } => commands::range::run_size(&config, &length),
            Commands::Fire {
                rof,
                recoil,
                shots,
                margin,
            } => commands::fire::run(&rof, recoil, shots, margin),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

//! Digitforge terminal application.
//!
//! Plays the digits puzzle and the magic-square puzzle on stdin/stdout, and
//! manages player profiles. Run `digitforge --help` for the command list.

use std::{io, process};

use clap::{Parser, Subcommand, ValueEnum};
use digitforge_core::Difficulty;
use digitforge_game::GameMode;
use log::info;

use crate::profile::{ProfileError, ProfileStore};

mod digits;
mod magic;
mod profile;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Classic,
    Timer,
    Challenge,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Classic => Self::Classic,
            ModeArg::Timer => Self::Timer,
            ModeArg::Challenge => Self::Challenge,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play the digits game (the default command).
    Play {
        /// Difficulty level.
        #[arg(long, value_name = "LEVEL", default_value = "easy")]
        difficulty: DifficultyArg,

        /// Play mode.
        #[arg(long, value_name = "MODE", default_value = "classic")]
        mode: ModeArg,

        /// Seed for reproducible puzzles. Random when omitted.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Profile name used to label the session.
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Play the magic-square game.
    Magic {
        /// Difficulty level; sets the grid size (3/4/5).
        #[arg(long, value_name = "LEVEL", default_value = "easy")]
        difficulty: DifficultyArg,

        /// Seed for a reproducible grid. Random when omitted.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
    /// Manage player profiles.
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Create a new profile.
    Create {
        /// Display name; must be unique ignoring case.
        name: String,
    },
    /// List existing profiles.
    List,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum AppError {
    #[display("I/O error: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Profile(ProfileError),
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Play {
        difficulty: DifficultyArg::Easy,
        mode: ModeArg::Classic,
        seed: None,
        profile: None,
    });

    let result = match command {
        Command::Play {
            difficulty,
            mode,
            seed,
            profile,
        } => play(difficulty.into(), mode.into(), seed, profile),
        Command::Magic { difficulty, seed } => magic::run(difficulty.into(), seed),
        Command::Profile { action } => run_profile(&action),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn play(
    difficulty: Difficulty,
    mode: GameMode,
    seed: Option<u64>,
    profile: Option<String>,
) -> Result<(), AppError> {
    let player = match profile {
        Some(name) => {
            let store = ProfileStore::open(ProfileStore::default_path())?;
            match store.find(&name) {
                Some(found) => Some(found.name.clone()),
                None => {
                    eprintln!("note: no profile named '{name}'; playing unlabeled");
                    None
                }
            }
        }
        None => None,
    };
    info!("starting {mode} session at {difficulty}");
    digits::run(difficulty, mode, seed, player.as_deref())
}

fn run_profile(action: &ProfileCommand) -> Result<(), AppError> {
    let mut store = ProfileStore::open(ProfileStore::default_path())?;
    match action {
        ProfileCommand::Create { name } => {
            let created = store.create(name)?;
            println!("created profile #{} '{}' ({})", created.id, created.name, created.initials);
        }
        ProfileCommand::List => {
            if store.profiles().is_empty() {
                println!("no profiles yet");
            }
            for profile in store.profiles() {
                println!("#{} {} ({})", profile.id, profile.name, profile.initials);
            }
        }
    }
    Ok(())
}

//! Monster Battle
//!
//! A terminal monster battle game.
//! - Pick a monster from the roster and fight a random opponent
//! - Four turn policies: alternating, speed-gated (one or two sided), animated
//! - Roster management from the menu or from subcommands
//! - Roster seeding from RON files

mod app;
mod assets;
mod battle;
mod commands;
mod config;
mod forms;
mod input;
mod menu;
mod render;

use anyhow::{Context, Result};
use app::{App, TerminalGuard};
use battle_core::{AttackKind, MonsterDraft, StatUpdate, TurnPolicy};
use battle_db::Store;
use clap::{Args, Parser, Subcommand};
use config::GameConfig;
use std::io::{stdout, BufWriter, Stdout};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Turn-based monster battles in the terminal
#[derive(Parser)]
#[command(name = "monster-battle")]
#[command(about = "Turn-based monster battles in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./battle.ron when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured turn policy
    #[arg(long, global = true)]
    policy: Option<TurnPolicy>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the main menu (default)
    Play,

    /// Go straight to the choose-monster screen
    Battle,

    /// Print the names of all monsters
    List {
        /// Print every stat
        #[arg(long)]
        stats: bool,
    },

    /// Add a monster
    Add(AddArgs),

    /// Change the stats of a monster
    Update(UpdateArgs),

    /// Delete a monster
    Delete {
        /// Monster ID
        id: u32,
    },

    /// Add the speed attribute to monsters stored before it existed
    Migrate,

    /// Add the monsters from a roster RON file or directory
    Seed {
        path: PathBuf,
    },

    /// Fight a battle without the UI, printing each hit
    Simulate {
        /// Monster ID of the player's monster
        player: u32,

        /// Use the powerful attack on every player turn
        #[arg(long)]
        powerful: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    name: String,
    /// Type tag, e.g. Fire
    kind: String,
    health: i32,
    attack: i32,
    defense: i32,
    #[arg(long)]
    speed: Option<i32>,
}

#[derive(Args)]
struct UpdateArgs {
    /// Monster ID
    id: u32,
    health: i32,
    attack: i32,
    defense: i32,
    #[arg(long)]
    speed: Option<i32>,
}

impl Command {
    fn is_interactive(&self) -> bool {
        matches!(self, Command::Play | Command::Battle)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);

    let mut config = GameConfig::resolve(cli.config.as_deref()).context("cannot load configuration")?;
    if let Some(policy) = cli.policy {
        config.battle.policy = policy;
    }

    let _guard = setup_logging(&config.log_dir, command.is_interactive())?;
    tracing::info!("Starting with {} turn policy", config.battle.policy);

    let store = Store::open(&config.database)
        .with_context(|| format!("cannot open roster at {}", config.database.display()))?;
    let legacy = store.legacy_rows()?;
    if legacy > 0 {
        tracing::warn!(
            "{} monsters predate the speed attribute and stay hidden until `monster-battle migrate` runs",
            legacy
        );
    }

    match command {
        Command::Play => run_interactive(store, config, App::run_menu),
        Command::Battle => run_interactive(store, config, App::run_battle),
        Command::List { stats: false } => commands::list(&store),
        Command::List { stats: true } => commands::show(&store),
        Command::Add(args) => {
            let mut draft = MonsterDraft::new(args.name, args.kind, args.health, args.attack, args.defense);
            draft.speed = args.speed;
            commands::add(&store, draft)
        }
        Command::Update(args) => commands::update(
            &store,
            args.id,
            StatUpdate {
                health: args.health,
                attack: args.attack,
                defense: args.defense,
                speed: args.speed,
            },
        ),
        Command::Delete { id } => commands::delete(&store, id),
        Command::Migrate => commands::migrate(&store),
        Command::Seed { path } => commands::seed(&store, &path),
        Command::Simulate { player, powerful } => {
            let kind = if powerful {
                AttackKind::Powerful
            } else {
                AttackKind::Normal
            };
            commands::simulate(&store, &config, player, kind).map(|_| ())
        }
    }
}

fn run_interactive(
    store: Store,
    config: GameConfig,
    screen: fn(&mut App<BufWriter<Stdout>>) -> Result<()>,
) -> Result<()> {
    let result = {
        let _terminal = TerminalGuard::enter()?;
        let mut app = App::new(BufWriter::new(stdout()), store, config);
        screen(&mut app)
    };
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    result
}

/// Interactive runs log to `<log_dir>/monster-battle.log` because the UI owns
/// the terminal; everything else logs to stderr.
fn setup_logging(log_dir: &Path, interactive: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if !interactive {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    }

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "monster-battle.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/monster-battle.log", log_dir.display());
    Ok(Some(guard))
}

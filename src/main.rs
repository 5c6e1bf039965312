//! Commander Ledger - command line front end
//!
//! Replays action scripts against the engine and runs the hand simulator
//! on a saved deck.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use commander_ledger::{
    core::PlayerId,
    game::{
        Action, DispatchOutcome, GameMode, GameOptions, GameState, OutputMode, PlayerSetup, Settings, Store,
        SystemClock,
    },
    loader::{load_catalog, load_deck_document, DeckDocument, DeckLoader},
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "Commander Ledger - multiplayer Commander game state engine", long_about = None)]
struct Cli {
    /// Seed for turn order and shuffles (default: random)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Echo every log line as it is written
    #[arg(long, global = true)]
    echo: bool,

    /// Offset of log timestamps from UTC, in minutes
    #[arg(long, global = true, default_value_t = 0, allow_hyphen_values = true)]
    utc_offset: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON array of actions and print the resulting table
    Play {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the final state as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Deal an opening hand from a deck and take mulligans or draws
    Simulate {
        /// Deck document (.json) or text decklist
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Card catalog (JSON), required for text decklists
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        #[arg(long, default_value_t = 0)]
        mulligans: u32,

        #[arg(long, default_value_t = 0)]
        draws: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let table = TableOptions {
        seed: cli.seed,
        echo: cli.echo,
        utc_offset: cli.utc_offset,
    };

    match cli.command {
        Commands::Play { script, json } => run_play(&script, table, json).await?,
        Commands::Simulate {
            deck,
            catalog,
            mulligans,
            draws,
        } => run_simulate(&deck, catalog.as_deref(), table, mulligans, draws).await?,
    }

    Ok(())
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Copy)]
struct TableOptions {
    seed: Option<u64>,
    echo: bool,
    utc_offset: i32,
}

fn new_store(settings: Settings, table: TableOptions) -> Store {
    let store = match table.seed {
        Some(seed) => Store::with_seed(settings, seed),
        None => Store::new(GameState::new(settings)),
    };
    let mut store = store.with_clock(Rc::new(SystemClock::with_offset(table.utc_offset)));
    if table.echo {
        store.set_log_output(OutputMode::Both);
    }
    store
}

/// Dispatch and report rejections without stopping
fn dispatch_reporting(store: &mut Store, index: usize, action: Action) {
    let name = action.name();
    match store.dispatch(action) {
        DispatchOutcome::Ignored(reason) => eprintln!("action {index} ({name}) ignored: {reason}"),
        DispatchOutcome::NothingToUndo => eprintln!("action {index} (UNDO): nothing to undo"),
        DispatchOutcome::Applied | DispatchOutcome::Undone => {}
    }
}

async fn run_play(script: &Path, table: TableOptions, json: bool) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(script)
        .await
        .with_context(|| format!("reading script {}", script.display()))?;
    let actions: Vec<Action> =
        serde_json::from_str(&content).with_context(|| format!("parsing script {}", script.display()))?;

    let mut store = new_store(Settings::default(), table);
    for (index, action) in actions.into_iter().enumerate() {
        dispatch_reporting(&mut store, index, action);
    }

    let state = store.state();
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    if !table.echo {
        for line in state.log.chronological() {
            println!("{line}");
        }
        println!();
    }
    print_table(state);
    Ok(())
}

fn print_table(state: &GameState) {
    println!("Turn {}", state.turn.count);
    for player in &state.players {
        let active = if state.turn.active_player == Some(player.id) { "*" } else { " " };
        let status = if player.eliminated { " (eliminated)" } else { "" };
        println!(
            "{active} {:<16} life {:>4}  hand {:>2}  library {:>3}{status}",
            player.name.as_str(),
            player.life,
            player.hand_count,
            player.library_count
        );
    }
    if let Some(winner) = state.winner.and_then(|id| state.get_player(id).ok()) {
        println!("Winner: {}", winner.name);
    }
}

async fn read_deck(deck: &Path, catalog: Option<&Path>) -> anyhow::Result<DeckDocument> {
    if deck.extension().is_some_and(|ext| ext == "json") {
        return Ok(load_deck_document(deck).await?);
    }
    let Some(catalog) = catalog else {
        bail!("text decklist {} needs --catalog", deck.display());
    };
    let catalog = load_catalog(catalog).await?;
    let content = tokio::fs::read_to_string(deck)
        .await
        .with_context(|| format!("reading decklist {}", deck.display()))?;
    let list = DeckLoader::parse(&content)?;
    let name = deck
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(list.resolve(&name, &catalog)?)
}

async fn run_simulate(
    deck: &Path,
    catalog: Option<&Path>,
    table: TableOptions,
    mulligans: u32,
    draws: usize,
) -> anyhow::Result<()> {
    let document = read_deck(deck, catalog).await?;
    let settings = Settings {
        game_mode: GameMode::DeckBuilder,
        player_count: 1,
        ..Settings::default()
    };
    let mut store = new_store(settings, table);
    store.dispatch(Action::InitGame {
        players: vec![PlayerSetup::named("Goldfish")],
        options: GameOptions {
            randomize_turn_order: false,
            mode: GameMode::DeckBuilder,
            seed: table.seed,
        },
    });
    let player_id: PlayerId = store
        .state()
        .players
        .first()
        .map(|p| p.id)
        .context("no player seated")?;

    let mut script = vec![
        Action::LoadDeckData {
            player_id,
            deck: document,
        },
        Action::TestInitHand { player_id },
    ];
    script.extend((0..mulligans).map(|_| Action::TestMulligan { player_id }));
    if draws > 0 {
        script.push(Action::TestDraw { player_id, count: draws });
    }
    for (index, action) in script.into_iter().enumerate() {
        dispatch_reporting(&mut store, index, action);
    }

    let zones = store.state().get_player_zones(player_id)?;
    let Some(sandbox) = zones.sandbox.as_ref() else {
        bail!("hand simulation did not start");
    };
    println!("Hand ({} cards, {} mulligans):", sandbox.hand.len(), sandbox.mulligans);
    for card in sandbox.hand.iter() {
        println!("  {} [{}]", card.name(), card.data.type_line);
    }
    println!("Library: {} cards left", sandbox.library.len());
    Ok(())
}

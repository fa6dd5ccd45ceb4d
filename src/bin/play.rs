//! Terminal front-end: play a match of snakes and ladders in the console.
//!
//! Human seats roll on Enter. Automated seats roll on their own after the
//! think delay. Set `RUST_LOG=debug` to watch the engine's turn log.

use std::io::{self, BufRead, Write};

use clap::Parser;
use snake_ladder::board::{GridCoord, JumpKind, Square, Topology, BOARD_SIDE};
use snake_ladder::core::{MatchConfig, MatchState, PlayerId, PlayerOverrides, Roster};
use snake_ladder::engine::{
    play_automated_turn, play_turn, Match, MatchEvent, NoPacer, Pacer, RollTrigger, StepKind,
    ThreadPacer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Snakes and ladders for two to four players
#[derive(Parser, Debug)]
#[command(name = "snake-ladder")]
#[command(about = "Play snakes and ladders in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of players. "1" plays against a bot; anything unparseable means 2.
    #[arg(short, long, default_value = "1")]
    players: String,

    /// Dice seed, for replaying a match
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before each single-square step, in milliseconds
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Skip every pause
    #[arg(long)]
    fast: bool,

    /// Let bots play every seat
    #[arg(long)]
    auto: bool,

    /// Stop after this many turns
    #[arg(long, default_value = "10000")]
    max_turns: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> io::Result<()> {
    let mut roster = Roster::from_request(&cli.players);
    if cli.auto {
        let bot = PlayerOverrides::new().automated(true);
        for id in PlayerId::all(roster.len()) {
            roster = roster.with_override(id, &bot);
        }
    }

    let mut config = if cli.fast {
        MatchConfig::instant()
    } else {
        MatchConfig::default()
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = cli.step_delay_ms {
        config = config.with_step_delay_ms(ms);
    }

    let mut pacer: Box<dyn Pacer> = if cli.fast {
        Box::new(NoPacer)
    } else {
        Box::new(ThreadPacer)
    };
    let mut game = Match::new(roster, config);
    info!(seed = game.seed(), "starting match");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    print_board(&mut out, game.state(), game.topology())?;

    for _ in 0..cli.max_turns {
        if game.state().is_over() {
            break;
        }

        let current = game.state().current_player();
        let record = if current.is_automated() {
            writeln!(out, "{} is thinking...", current.name)?;
            match play_automated_turn(&mut game, &mut *pacer, print_event) {
                Some(record) => Some(record),
                None => play_turn(&mut game, RollTrigger::Automated, &mut *pacer, print_event),
            }
        } else {
            write!(out, "{}, press Enter to roll (q to quit): ", current.name)?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
                break;
            }
            play_turn(&mut game, RollTrigger::Human, &mut *pacer, print_event)
        };

        if record.is_some() {
            print_board(&mut out, game.state(), game.topology())?;
        }
    }

    match game.state().winner().and_then(|id| game.state().player(id)) {
        Some(winner) => writeln!(out, "{} wins!", winner.name)?,
        None => writeln!(out, "No winner.")?,
    }
    Ok(())
}

fn print_event(event: &MatchEvent) {
    match event {
        MatchEvent::Rolled { player, roll } => println!("{player} rolled {roll}"),
        MatchEvent::Step { step, .. } => match step.kind {
            StepKind::Walk => println!("  -> {}", step.square),
            StepKind::Snap(JumpKind::Shortcut) => println!("  ladder up to {}", step.square),
            StepKind::Snap(JumpKind::Setback) => println!("  snake down to {}", step.square),
        },
        MatchEvent::TurnEnded { record, next } => {
            if record.overshoot {
                let needed = Square::MAX - record.from.value();
                println!("  {} needs exactly {needed} to finish", record.player);
            }
            println!("{next} to move");
        }
        MatchEvent::Won { winner, .. } => println!("{winner} reached 100!"),
    }
}

/// Draw the board top row first. Tokens show as seat numbers, ladder feet
/// as `^`, snake heads as `v`.
fn print_board(
    out: &mut impl Write,
    state: &MatchState,
    topology: &Topology,
) -> io::Result<()> {
    let side = usize::from(BOARD_SIDE);
    let mut cells = vec![String::new(); side * side];

    for square in Square::on_board() {
        let coord = GridCoord::from_square(square);
        let tokens: String = state
            .positions()
            .filter(|&(_, at)| at == square)
            .map(|(id, _)| char::from(b'0' + id.0))
            .collect();
        let label = if !tokens.is_empty() {
            format!("[{tokens}]")
        } else {
            match topology.jump(square).map(|jump| jump.kind) {
                Some(JumpKind::Shortcut) => format!("{square}^"),
                Some(JumpKind::Setback) => format!("{square}v"),
                None => square.to_string(),
            }
        };
        cells[usize::from(coord.row) * side + usize::from(coord.column)] = label;
    }

    for row in cells.chunks(side) {
        let line: Vec<String> = row.iter().map(|cell| format!("{cell:>6}")).collect();
        writeln!(out, "{}", line.join(""))?;
    }

    let waiting: Vec<String> = state
        .positions()
        .filter(|&(_, at)| at.is_start())
        .map(|(id, _)| id.to_string())
        .collect();
    if !waiting.is_empty() {
        writeln!(out, "  start: {}", waiting.join(", "))?;
    }
    Ok(())
}

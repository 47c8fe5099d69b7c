//! Algorithm walkthroughs in the terminal.
//!
//! Provides the `algoviz` binary: list the built-in visualizers, describe
//! one, print a full trace, or play a trace back on a timer.
//!
//! Playback settings come from `ALGOVIZ_*` environment variables (see
//! `algoviz_player::config`); command-line flags override them.

use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use algoviz_core::{ProblemId, Step, StepKind, Trace};
use algoviz_player::{
    Playback, PlaybackState, PlayerError, PlayerHandle, Session, SessionConfig, SessionError,
};
use algoviz_trace::{RawInput, Registry};

/// Step-by-step algorithm walkthroughs.
#[derive(Parser)]
#[command(name = "algoviz", about = "Step-by-step algorithm walkthroughs")]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every visualizer.
    List {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a visualizer's input fields and test cases.
    Describe {
        /// Problem number.
        id: u32,
    },

    /// Print the full trace for one input.
    Trace {
        /// Problem number.
        id: u32,

        #[command(flatten)]
        input: InputArgs,

        /// Print the trace as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Play a trace back one step per tick.
    Play {
        /// Problem number.
        id: u32,

        #[command(flatten)]
        input: InputArgs,

        /// Speed multiplier on the tick interval.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,

        /// Tick interval at speed 1, in milliseconds.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

/// Where the input comes from. Defaults to the first test case.
#[derive(Args)]
struct InputArgs {
    /// Input field as FIELD=VALUE, repeatable.
    #[arg(short, long = "input", value_name = "FIELD=VALUE")]
    inputs: Vec<String>,

    /// Use the N-th built-in test case.
    #[arg(long, conflicts_with_all = ["inputs", "seed"])]
    case: Option<usize>,

    /// Use a random input drawn from this seed.
    #[arg(long, conflicts_with = "inputs")]
    seed: Option<u64>,
}

const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_UNKNOWN_PROBLEM: i32 = 2;
const EXIT_GENERATION_FAILED: i32 = 3;
const EXIT_PLAYER_FAILED: i32 = 4;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let registry = Registry::builtin();
    let exit_code = match cli.command {
        Commands::List { json } => run_list(&registry, json),
        Commands::Describe { id } => run_describe(&registry, ProblemId(id)),
        Commands::Trace { id, input, json } => run_trace(&registry, ProblemId(id), &input, json),
        Commands::Play {
            id,
            input,
            speed,
            interval_ms,
        } => run_play(&registry, ProblemId(id), &input, speed, interval_ms).await,
    };
    process::exit(exit_code);
}

fn run_list(registry: &Registry, json: bool) -> i32 {
    let catalog = registry.catalog();
    if json {
        let out = serde_json::to_string_pretty(&catalog).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize catalog: {}\"}}", e)
        });
        println!("{}", out);
        return 0;
    }
    for info in catalog {
        println!(
            "{:>4}  {:<28} {:<20} {}",
            info.id.0,
            info.title,
            info.category.label(),
            info.summary
        );
    }
    0
}

fn run_describe(registry: &Registry, id: ProblemId) -> i32 {
    let Some(vis) = registry.resolve(id) else {
        eprintln!("Error: no visualizer for problem {}", id);
        return EXIT_UNKNOWN_PROBLEM;
    };
    let info = vis.info();
    println!("{}. {} ({})", info.id, info.title, info.category.label());
    println!("{}", info.summary);
    println!();
    println!("Fields:");
    for field in info.fields {
        println!("  {:<8} {:<16} e.g. {}", field.name, field.label, field.placeholder);
    }
    println!();
    println!("Test cases:");
    for (i, case) in vis.test_cases().iter().enumerate() {
        println!("  [{}] {}: {}", i, case.name, format_input(&case.input));
    }
    0
}

fn run_trace(registry: &Registry, id: ProblemId, input: &InputArgs, json: bool) -> i32 {
    let config = SessionConfig::from_env();
    let session = match open_session(registry, id, input, &config) {
        Ok(session) => session,
        Err(code) => return code,
    };

    if json {
        let out = serde_json::to_string_pretty(session.trace()).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize trace: {}\"}}", e)
        });
        println!("{}", out);
    } else {
        println!("{} with {}", session.info().title, format_input(session.input()));
        print_trace(session.trace());
    }
    0
}

async fn run_play(
    registry: &Registry,
    id: ProblemId,
    input: &InputArgs,
    speed: f64,
    interval_ms: Option<u64>,
) -> i32 {
    if !speed.is_finite() || speed <= 0.0 {
        eprintln!("Error: speed must be a positive number, got {}", speed);
        return EXIT_INVALID_INPUT;
    }
    let mut config = SessionConfig::from_env();
    if let Some(ms) = interval_ms.filter(|ms| *ms > 0) {
        config.playback.base_interval = Duration::from_millis(ms);
    }
    // The process exits once the last step is shown.
    config.playback.auto_reset_delay = None;
    if Duration::try_from_secs_f64(config.playback.base_interval.as_secs_f64() / speed).is_err() {
        eprintln!("Error: speed {} is too slow to ever advance", speed);
        return EXIT_INVALID_INPUT;
    }

    let session = match open_session(registry, id, input, &config) {
        Ok(session) => session,
        Err(code) => return code,
    };
    println!("{} with {}", session.info().title, format_input(session.input()));

    let player = PlayerHandle::spawn(session.into_playback());
    let mut frames = player.frames();
    if let Some(step) = player.frame().step {
        print_step(&step);
    }
    if player.set_speed(speed).is_err() || player.play().is_err() {
        return stopped(player).await;
    }

    let mut shown = player.frame().cursor;
    let mut started = false;
    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    return stopped(player).await;
                }
                let frame = frames.borrow_and_update().clone();
                if frame.cursor != shown {
                    if let Some(step) = &frame.step {
                        print_step(step);
                    }
                    shown = frame.cursor;
                }
                let on_last = frame.cursor.is_some() && frame.cursor == frame.total.checked_sub(1);
                if frame.state == PlaybackState::Playing {
                    started = true;
                } else if started || on_last {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Interrupted");
                break;
            }
        }
    }

    player_exit_code(player.shutdown().await)
}

/// Shuts down a player task that went away before playback finished.
async fn stopped(player: PlayerHandle) -> i32 {
    player_exit_code(player.shutdown().await.and(Err(PlayerError::Closed)))
}

fn player_exit_code(result: Result<Playback, PlayerError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            tracing::error!(error = %e, "player failed");
            eprintln!("Error: {}", e);
            EXIT_PLAYER_FAILED
        }
    }
}

/// Builds a session for `id` with the input `args` select. Failures are
/// reported on stderr and returned as an exit code.
fn open_session(
    registry: &Registry,
    id: ProblemId,
    args: &InputArgs,
    config: &SessionConfig,
) -> Result<Session, i32> {
    let mut session = match Session::open(registry, id, config) {
        Ok(session) => session,
        Err(e) => return Err(report(e)),
    };

    let loaded = if !args.inputs.is_empty() {
        RawInput::from_assignments(&args.inputs)
            .and_then(|raw| session.set_input(raw))
            .map_err(SessionError::from)
    } else if let Some(index) = args.case {
        session.load_test_case(index)
    } else if let Some(seed) = args.seed {
        session.randomize(seed)
    } else {
        Ok(())
    };
    loaded.map_err(report)?;

    if let Some(failure) = session.last_failure() {
        eprintln!("Error: trace generation failed: {}", failure);
        return Err(EXIT_GENERATION_FAILED);
    }
    Ok(session)
}

fn report(err: SessionError) -> i32 {
    eprintln!("Error: {}", err);
    match err {
        SessionError::UnknownProblem { .. } => EXIT_UNKNOWN_PROBLEM,
        SessionError::NoSuchTestCase { .. } | SessionError::Input(_) => EXIT_INVALID_INPUT,
    }
}

fn format_input(raw: &RawInput) -> String {
    raw.fields()
        .map(|(field, value)| format!("{}={}", field, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_trace(trace: &Trace) {
    for step in trace {
        print_step(step);
    }
}

fn print_step(step: &Step) {
    let kind = match step.kind {
        StepKind::Init => "init",
        StepKind::Transition => "step",
        StepKind::Enter => "enter",
        StepKind::Return => "return",
        StepKind::Terminal => "done",
    };
    println!("#{:<3} [{:<6}] {}", step.id.0, kind, step.description);
    let vars: Vec<String> = step
        .variables
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    if !vars.is_empty() {
        println!("       {}", vars.join("  "));
    }
    for (name, value) in &step.data {
        println!("       {}: {}", name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_player_is_a_failure() {
        assert_eq!(player_exit_code(Err(PlayerError::Panicked)), EXIT_PLAYER_FAILED);
        assert_eq!(player_exit_code(Err(PlayerError::Closed)), EXIT_PLAYER_FAILED);
        assert_eq!(player_exit_code(Ok(Playback::new(Default::default()))), 0);
    }
}

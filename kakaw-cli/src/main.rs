//! Replay a Ka-kaw game from text notation.
//!
//! Usage:
//!   # Print the board after every action
//!   cargo run --bin replay -- --moves "R(3,1) R(0,1) (2,1)->(2,2) x(3,1)"
//!
//!   # Custom rules, stop at the first refused action
//!   cargo run --bin replay -- --rules rules.toml --strict --moves "..."
//!
//!   # Final state as JSON, plus what the player to move could do
//!   cargo run --bin replay -- --moves "..." --json --legal
//!
//! Set RUST_LOG=debug to see every gate the engine evaluates.

mod render;

use std::env;
use std::path::PathBuf;
use std::process;

use kakaw_core::notation::parse_actions;
use kakaw_core::{GameState, Rules};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::{render_board, render_reserves, render_status};

fn print_usage() {
    println!("Usage: replay --moves \"<actions>\" [options]");
    println!();
    println!("Actions (space separated):");
    println!("  R(3,1)          place a bird (R S H A B)");
    println!("  (2,1)->(2,2)    move a bird");
    println!("  x(3,1)          take a bird back into the reserve");
    println!();
    println!("Options:");
    println!("  --moves <seq>   actions to replay");
    println!("  --rules <path>  TOML rules file (max_rows, max_cols, turn_order)");
    println!("  --strict        stop at the first refused action");
    println!("  --json          print the final state as JSON");
    println!("  --legal         list the legal actions of the player to move");
    println!("  -h, --help      show this message");
}

#[derive(Default)]
struct Options {
    moves: String,
    rules: Option<PathBuf>,
    strict: bool,
    json: bool,
    legal: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--moves" => {
                i += 1;
                opts.moves = args.get(i).cloned().ok_or("--moves needs a value")?;
            }
            "--rules" => {
                i += 1;
                opts.rules = Some(args.get(i).map(PathBuf::from).ok_or("--rules needs a path")?);
            }
            "--strict" => opts.strict = true,
            "--json" => opts.json = true,
            "--legal" => opts.legal = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(opts))
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(msg) = run(&opts) {
        eprintln!("Error: {}", msg);
        process::exit(1);
    }
}

fn run(opts: &Options) -> Result<(), String> {
    let rules = match &opts.rules {
        Some(path) => Rules::load(path).map_err(|e| e.to_string())?,
        None => Rules::default(),
    };
    let actions = parse_actions(&opts.moves).map_err(|e| e.to_string())?;
    let mut state = GameState::with_rules(rules).map_err(|e| e.to_string())?;
    info!(actions = actions.len(), ?rules, "replaying");

    println!("Start");
    println!("{}", render_board(state.board()));

    let mut refused = 0;
    for (i, action) in actions.iter().enumerate() {
        let mover = state.current_player();
        match state.apply(*action) {
            Ok(next) => {
                state = next;
                println!("{:>3}. {} plays {}", i + 1, mover, action);
                println!("{}", render_board(state.board()));
            }
            Err(e) => {
                refused += 1;
                warn!(index = i + 1, %action, error = %e, "action refused");
                println!("{:>3}. {} tried {}: {}", i + 1, mover, action, e);
                if opts.strict {
                    return Err(format!("action {} refused", i + 1));
                }
            }
        }
    }

    println!("{}", render_status(&state));
    print!("{}", render_reserves(&state));
    if refused > 0 {
        println!("{} of {} actions refused", refused, actions.len());
    }

    if opts.legal {
        let legal = state.legal_actions();
        println!();
        println!("{} legal actions:", legal.len());
        for action in legal {
            println!("  {}", action);
        }
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&state).map_err(|e| e.to_string())?;
        println!("{}", json);
    }

    Ok(())
}

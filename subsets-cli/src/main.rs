//! Standalone CLI for the Subsets core:
//!
//! ```text
//! subsets [-v] [--seed <int>] <params> | <params>:<desc>
//! ```
//!
//! Without a description, generates a puzzle for `<params>` (default
//! [`Params::standard`]) from `--seed` (default: current time) and prints
//! the parameters and the generated game ID. With `<params>:<desc>`,
//! validates and solves the description and prints the text-format dump.
//! `-v` turns on the solver's rule-trace logging.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use subsets_core::format::desc;
use subsets_core::params::Params;
use subsets_core::textdump;
use subsets_core::validator::SolveStatus;
use subsets_gen::generate;
use subsets_solver::solve;

const USAGE: &str = "usage: subsets [-v] [--seed <int>] <params> | <params>:<desc>\n\
\n\
  <params>        e.g. 4x4n4\n\
  <params>:<desc> validate and solve a game description\n\
\n\
  -v              enable solver rule-trace logging\n\
  --seed <int>    seed for puzzle generation (default: current time)\n";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut verbose = false;
    let mut seed: Option<u64> = None;
    let mut positional: Option<String> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" => verbose = true,
            "--seed" => match iter.next().and_then(|v| v.parse::<u64>().ok()) {
                Some(v) => seed = Some(v),
                None => {
                    eprintln!("--seed requires an integer value\n\n{USAGE}");
                    return ExitCode::FAILURE;
                }
            },
            "-h" | "--help" => {
                print!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            other if positional.is_none() => positional = Some(other.to_string()),
            _ => {
                eprintln!("unexpected extra argument\n\n{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    if verbose {
        init_verbose_tracing();
    }

    let Some(arg) = positional else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let (params_str, inline_desc) = match arg.split_once(':') {
        Some((p, d)) => (p, Some(d.to_string())),
        None => (arg.as_str(), None),
    };

    let params: Params = match params_str.parse() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match inline_desc {
        None => run_generate(params, seed),
        Some(d) => run_solve(params, &d),
    }
}

fn run_generate(params: Params, seed: Option<u64>) -> ExitCode {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    match generate(params, seed) {
        Ok(g) => {
            println!("{params}:{}", g.desc);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_solve(params: Params, raw_desc: &str) -> ExitCode {
    let board = match desc::parse(params, raw_desc) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let (solved, status) = match solve(&board) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match status {
        SolveStatus::Invalid => {
            println!("Puzzle is invalid.");
            ExitCode::FAILURE
        }
        SolveStatus::Unfinished | SolveStatus::Complete => {
            println!("{}", textdump::dump(&solved));
            ExitCode::SUCCESS
        }
    }
}

#[cfg(feature = "telemetry-subscriber")]
fn init_verbose_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("subsets_solver=trace,subsets_gen=trace"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(not(feature = "telemetry-subscriber"))]
fn init_verbose_tracing() {}

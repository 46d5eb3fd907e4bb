use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemelet::driver::{run_file, run_repl, RunOptions};
use schemelet::LispEvaluator;

/// schemelet is a minimal Scheme interpreter. With a FILE it evaluates the
/// file unit by unit; without one it starts an interactive REPL.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to evaluate in batch mode
    file: Option<PathBuf>,

    /// Abort evaluation nested deeper than this many frames
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print each parsed form as JSON before evaluating it
    #[arg(long)]
    dump_ast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut evaluator = LispEvaluator::new();
    if let Some(limit) = args.max_depth {
        evaluator = evaluator.with_max_depth(limit);
    }
    let options = RunOptions {
        dump_ast: args.dump_ast,
    };

    match args.file {
        Some(path) => {
            if !path.is_file() {
                println!("Error: File '{}' not found.", path.display());
                return Ok(ExitCode::FAILURE);
            }
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run_file(&path, &mut out, &evaluator, &options)?;
        }
        None => run_repl(evaluator, options)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

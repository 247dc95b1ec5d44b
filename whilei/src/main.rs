//! whilei CLI

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use whilei::config::Config;
use whilei::error::report_error;
use whilei::interp::{DecPolicy, interpret_traced};
use whilei::parser::split_statements;
use whilei::repl::{Repl, format_bindings};

#[derive(Parser)]
#[command(name = "whilei", version, about = "Interpreter for the WHILE language")]
struct Cli {
    /// Log interpreter steps to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a WHILE source file
    Run {
        /// Source file to run
        file: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run a WHILE program given on the command line
    Eval {
        /// Program text, e.g. "x := 2; WHILE(x > y) DO x = dec(x) OD"
        source: String,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Split a source file into statements and dump them (debug)
    Split {
        /// Source file to split
        file: PathBuf,
    },
    /// Start an interactive session
    Repl {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the input program, its statements and the final bindings
    #[arg(long)]
    trace: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Behaviour of dec() below zero
    #[arg(long, value_enum)]
    dec: Option<DecArg>,
    /// Abort a loop after this many iterations
    #[arg(long)]
    max_iterations: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecArg {
    Wrapping,
    Saturating,
}

impl From<DecArg> for DecPolicy {
    fn from(arg: DecArg) -> Self {
        match arg {
            DecArg::Wrapping => DecPolicy::Wrapping,
            DecArg::Saturating => DecPolicy::Saturating,
        }
    }
}

impl RunArgs {
    /// Config file values overridden by command-line flags
    fn resolve(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if self.trace {
            config.verbose = true;
        }
        if let Some(dec) = self.dec {
            config.dec = dec.into();
        }
        if self.max_iterations.is_some() {
            config.max_iterations = self.max_iterations;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run { file, run } => run_file(&file, &run),
        Command::Eval { source, run } => run_source("<eval>", &source, &run),
        Command::Split { file } => split_file(&file),
        Command::Repl { run } => start_repl(&run),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Route `tracing` events to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run_file(path: &Path, args: &RunArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    run_source(&path.display().to_string(), &source, args)
}

/// Interpret a program and print its outcome. Returns false if it failed.
fn run_source(filename: &str, source: &str, args: &RunArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = args.resolve()?;
    let (trace, result) = interpret_traced(source, &config.options());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else if config.verbose {
        print!("{trace}");
    } else if let Ok(env) = &result {
        print!("{}", format_bindings(env));
    }

    match result {
        Ok(_) => Ok(true),
        Err(err) => {
            report_error(filename, source, &err)?;
            Ok(false)
        }
    }
}

fn split_file(path: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let statements = split_statements(&source)?;
    for (i, stmt) in statements.iter().enumerate() {
        println!("{i:>3} @ {}: {}", stmt.span, stmt.text);
    }

    Ok(true)
}

fn start_repl(args: &RunArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = args.resolve()?;
    let mut repl = Repl::new(config.options())?;
    repl.run()?;
    Ok(true)
}

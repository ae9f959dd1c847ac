//! rfs - interactive shell over a remote node filesystem.
//!
//! Usage:
//!   rfs [options]
//!
//! Examples:
//!   rfs                              # Demo tree, line editor on a terminal
//!   rfs --seed tree.json             # Start from a JSON tree description
//!   rfs --empty --script cmds.txt    # Run commands from a file
//!   echo "lr" | rfs --quiet          # Line-based input from a pipe

mod editor;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use env_logger::Env;
use log::{info, LevelFilter};

use rfs_core::{
    load_seed_from_path, script_source, Interpreter, MemoryRegistry, ReaderSource, SeedTree,
    ShellConfig, StdConsole, DEFAULT_MAX_LINE_LEN,
};

use crate::editor::EditorSource;

/// Remote node filesystem shell
#[derive(Parser, Debug)]
#[command(name = "rfs")]
#[command(about = "Interactive shell over a tree of remote files and directories")]
struct Args {
    /// JSON file describing the initial tree
    #[arg(long, conflicts_with = "empty")]
    seed: Option<PathBuf>,

    /// Start with an empty root directory instead of the demo tree
    #[arg(long)]
    empty: bool,

    /// Read commands from a file instead of standard input
    #[arg(long)]
    script: Option<PathBuf>,

    /// Use line-based input even on a terminal
    #[arg(long)]
    plain: bool,

    /// History file for the line editor
    #[arg(long)]
    history: Option<PathBuf>,

    /// Maximum input line length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line: usize,

    /// Do not print the command summary at startup
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn build_registry(args: &Args) -> Result<MemoryRegistry> {
    let seed = if args.empty {
        SeedTree::default()
    } else if let Some(path) = &args.seed {
        load_seed_from_path(path)
            .with_context(|| format!("failed to load seed {}", path.display()))?
    } else {
        SeedTree::demo()
    };
    let registry = MemoryRegistry::with_seed(&seed).context("failed to populate registry")?;
    info!("registry ready with {} node(s)", registry.node_count());
    Ok(registry)
}

/// Run one session to completion. Blocks on input.
fn run_session(args: &Args, registry: MemoryRegistry) -> Result<i32> {
    let config = ShellConfig {
        max_line_len: args.max_line,
        banner: !args.quiet,
        ..ShellConfig::default()
    };
    let max_len = config.max_line_len;
    let mut interp = Interpreter::with_config(registry, StdConsole::new(), config);

    if let Some(path) = &args.script {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut source = script_source(BufReader::new(file), max_len);
        return Ok(interp.run(&mut source)?);
    }

    let interactive = std::io::stdin().is_tty() && !args.plain;
    if interactive {
        let mut source = EditorSource::new(max_len, args.history.clone())?;
        let status = interp.run(&mut source);
        source.save_history();
        Ok(status?)
    } else {
        let mut source = ReaderSource::new(std::io::stdin().lock(), std::io::stdout(), max_len);
        Ok(interp.run(&mut source)?)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let registry = build_registry(&args)?;

    // The interpreter is synchronous; keep it off the async workers.
    let session = tokio::task::spawn_blocking(move || run_session(&args, registry));

    tokio::select! {
        result = session => {
            let status = result??;
            Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            std::process::exit(130);
        }
    }
}

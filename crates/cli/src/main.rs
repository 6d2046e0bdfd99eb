//! SearchBox CLI — drive the debounced search controller from a terminal.
//!
//! `replay` runs a script on a virtual clock (no real waiting), `interactive`
//! runs the tokio driver against stdin in real time.

mod interactive;
mod replay;
mod script;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use searchbox_core::{load_searchbox_config, read_config_file, SearchBoxConfig};

use replay::Replay;
use script::parse_script;

/// SearchBox CLI — see when a debounced search box would fire.
#[derive(Parser)]
#[command(name = "sb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Explicit config file (default: .searchbox.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the debounce delay in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Override the minimum commit length
    #[arg(long)]
    min_len: Option<usize>,

    /// Override the confirm key name
    #[arg(long)]
    confirm_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script on a virtual clock and print the commits
    Replay {
        /// Script file (default: read from stdin)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Text the caller holds when the search box is created
        #[arg(long, default_value = "")]
        authoritative: String,

        /// Do not feed commits back as the caller's new authoritative text
        #[arg(long)]
        no_echo: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Type queries line by line; each line replaces the input text
    Interactive {
        /// Text the caller holds when the search box is created
        #[arg(long, default_value = "")]
        authoritative: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the effective configuration
    Config {
        /// Project root to look for .searchbox.toml (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Could not determine current directory: {e}");
        std::process::exit(1);
    })
}

fn resolve_config(args: ConfigArgs) -> SearchBoxConfig {
    let mut config = match &args.config {
        Some(path) => read_config_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => load_searchbox_config(&current_dir()),
    };
    if let Some(ms) = args.debounce_ms {
        if ms == 0 {
            eprintln!("--debounce-ms must be greater than zero");
            std::process::exit(1);
        }
        config.debounce_ms = ms;
    }
    if let Some(len) = args.min_len {
        config.min_commit_len = len;
    }
    if let Some(key) = args.confirm_key {
        config.confirm_key = key;
    }
    config
}

fn read_script(path: Option<&Path>) -> String {
    match path {
        Some(p) => std::fs::read_to_string(p).unwrap_or_else(|e| {
            eprintln!("Could not read {}: {e}", p.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Could not read script from stdin: {e}");
                std::process::exit(1);
            }
            buf
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("searchbox=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, authoritative, no_echo, config } => {
            let config = resolve_config(config);
            let src = read_script(script.as_deref());
            let steps = parse_script(&src).unwrap_or_else(|e| {
                eprintln!("Invalid script: {e}");
                std::process::exit(1);
            });

            let outcome = Replay::new(&config, &authoritative, !no_echo).run(steps);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
            } else {
                for c in &outcome.commits {
                    println!("{:>7}ms  line {:<4} commit {:?}", c.at_ms, c.line, c.text);
                }
                eprintln!(
                    "\n{} commit(s); input shows {:?}, caller holds {:?}",
                    outcome.commits.len(),
                    outcome.display_text,
                    outcome.authoritative_text
                );
            }
        }
        Commands::Interactive { authoritative, config } => {
            let config = resolve_config(config);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap_or_else(|e| {
                    eprintln!("Could not start runtime: {e}");
                    std::process::exit(1);
                });
            runtime.block_on(interactive::run(config, authoritative, cli.json));
        }
        Commands::Config { root } => {
            let root = root.unwrap_or_else(current_dir);
            let config = load_searchbox_config(&root);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config).unwrap());
            } else {
                println!("Debounce:       {}ms", config.debounce_ms);
                println!("Min length:     {}", config.min_commit_len);
                println!("Confirm key:    {}", config.confirm_key);
                if config.hidden_components.is_empty() {
                    println!("Hidden:         (none)");
                } else {
                    println!("Hidden:         {}", config.hidden_components.join(", "));
                }
            }
        }
    }
}

mod bank;
mod cli;
mod config;
mod demo;
mod list;
mod queue;
mod roster;
mod runlog;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kata",
    about = "Small object-pattern samples: a roster, a bank, two structures"
)]
pub struct Args {
    #[arg(help = "Sample to run (see --list)")]
    pub sample: Option<String>,

    #[arg(long, help = "List available samples and exit")]
    pub list: bool,

    #[arg(short, long, help = "Interactive roster playground")]
    pub interactive: bool,

    #[arg(long, env = "KATA_CONFIG", help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "KATA_LOG_FILE",
        value_name = "PATH",
        help = "Append run events to a JSONL log"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Verbose output (config origin, run id)")]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (stock values merged with whatever files exist)
    let cfg = if let Some(config_path) = &args.config {
        config::DemoConfig::load_with_file(config_path)?
    } else {
        config::DemoConfig::load()?
    };

    if let Err(errors) = cfg.validate() {
        let mut report = String::from("Invalid configuration:");
        for error in &errors {
            report.push_str(&format!("\n  {}", error));
        }
        anyhow::bail!(report);
    }

    if args.verbose {
        match &args.config {
            Some(path) => eprintln!("Config: {}", path.display()),
            None => eprintln!("Config: built-ins + ~/.kata/config.toml + ./kata.toml (when present)"),
        }
    }

    // Handle --list: dump the sample catalog and exit
    if args.list {
        println!("Available samples:");
        for (name, blurb) in demo::catalog() {
            let marker = if name == demo::DEFAULT_DEMO {
                " (default)"
            } else {
                ""
            };
            println!("  {:<12}- {}{}", name, blurb, marker);
        }
        return Ok(());
    }

    let mut log = match &args.log_file {
        Some(path) => Some(runlog::RunLog::new(path)?),
        None => None,
    };
    if let Some(log) = log.as_mut() {
        let argv: Vec<String> = std::env::args().collect();
        log.run_start(&argv)?;
        if args.verbose {
            eprintln!("Run id: {}", log.run_id());
            eprintln!("Logging to: {}", log.path.display());
        }
    }

    if args.interactive {
        let ctx = cli::Context {
            config: cfg,
            roster: roster::Roster::new(),
            log,
        };
        return cli::run_repl(ctx);
    }

    let sample = args.sample.as_deref().unwrap_or(demo::DEFAULT_DEMO);
    demo::run(sample, &cfg, log.as_mut())
}

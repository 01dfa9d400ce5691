//! Tonal-space cadence resolver.
//!
//! Resolves cadences written in notation or stored as logical-form JSON into
//! tonal-space paths, printed one path per invocation on stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tspath::analyze::{FormSource, resolve_notation, stitch_source};
use tspath::core::names::PathFormat;
use tspath::exit_codes;
use tspath::io::config::{DEFAULT_CONFIG_PATH, TspathConfig, load_config, write_config};
use tspath::logging;
use tspath::validate::validate_form_file;

#[derive(Parser)]
#[command(
    name = "tspath",
    version,
    about = "Resolve cadence logical forms into tonal-space paths"
)]
struct Cli {
    /// Path to the TOML config; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output format for points (xy, roman, alpha, json); overrides config.
    #[arg(long, global = true)]
    format: Option<PathFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the path of a single cadence, e.g. `leftonto(<0,0>)`.
    Resolve { notation: String },
    /// Print the stitched path of a logical form given inline or as a JSON file.
    Stitch {
        /// Logical form in notation, e.g. `[leftonto(<0,0>), <0,0>]`.
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        notation: Option<String>,
        /// Logical-form JSON file.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check a logical-form JSON file against the schema and invariants.
    ///
    /// Exits 0 when clean, 2 with warnings only, 1 on errors.
    Validate { file: PathBuf },
    /// Write a default config file.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run(Cli::parse()) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Resolve { notation } => {
            let cfg = load(&cli.config)?;
            let path = resolve_notation(&cfg, &notation)?;
            println!("{}", output_format(&cfg, cli.format).render(&path));
            Ok(exit_codes::OK)
        }
        Command::Stitch { notation, file } => {
            let cfg = load(&cli.config)?;
            let source = match (&notation, &file) {
                (Some(text), _) => FormSource::Notation(text),
                (None, Some(path)) => FormSource::File(path),
                (None, None) => bail!("stitch needs a logical form or --file"),
            };
            let path = stitch_source(&cfg, source)?;
            println!("{}", output_format(&cfg, cli.format).render(&path));
            Ok(exit_codes::OK)
        }
        Command::Validate { file } => {
            let report = validate_form_file(&file)?;
            for error in &report.errors {
                println!("error: {error}");
            }
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
            if report.errors.is_empty() {
                println!("{}: {} cadences", file.display(), report.cadences);
            }
            Ok(report.exit_code())
        }
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        eprintln!(
            "{} already exists; use --force to overwrite",
            config_path.display()
        );
        return Ok(exit_codes::OK);
    }
    write_config(config_path, &TspathConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("wrote {}", config_path.display());
    Ok(exit_codes::OK)
}

fn load(config_path: &Path) -> Result<TspathConfig> {
    load_config(config_path).with_context(|| format!("load config {}", config_path.display()))
}

fn output_format(cfg: &TspathConfig, flag: Option<PathFormat>) -> PathFormat {
    flag.unwrap_or(cfg.format)
}

mod case;
mod cli;
mod config;
mod judge;
mod outcome;
mod report;
mod results;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eval", version, about = "Evaluation harness for tspath")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List cases with their forms.
    List,
    /// Resolve a case (every case when omitted) and judge it against gold.
    Run {
        case_id: Option<String>,
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },
    /// Summarize captured runs of a case.
    Report { case_id: String },
    /// Delete captured runs of a case.
    Clean { case_id: String },
}

fn main() -> Result<()> {
    tspath::logging::init();
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;
    match cli.command {
        Command::List => cli::list_cases(&repo_root),
        Command::Run { case_id, runs } => cli::run_cases(&repo_root, case_id.as_deref(), runs),
        Command::Report { case_id } => cli::report_case(&repo_root, &case_id),
        Command::Clean { case_id } => cli::clean_case(&repo_root, &case_id),
    }
}

//! vocab-drill - bilingual vocabulary drill
//!
//! Generates reviews weighted toward weak words and grades the answers,
//! keeping a mastery score for every entry in a plain text word bank.

mod config;
mod error;
mod grader;
mod models;
mod parser;
mod review;
mod session;
mod storage;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use config::Config;
use models::ReviewMode;
use session::Session;
use storage::TextFile;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "vocab-drill")]
#[command(author, version, about = "Score-weighted bilingual vocabulary drill", long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Word bank file, overriding the config
    #[arg(short, long, global = true)]
    word_bank: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new review file from the weakest words
    Review {
        /// How to order the word bank before picking cards
        #[arg(short, long, value_enum)]
        mode: Option<ReviewMode>,
    },
    /// Grade the filled-in review file and write the mistake report
    Grade,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(path) = args.word_bank {
        config.word_bank_path = path;
    }

    init_tracing(&config.log_level);

    let bank = TextFile::new(&config.word_bank_path);
    let mut session = Session::open(config.clone(), bank)
        .with_context(|| format!("Failed to load word bank: {:?}", config.word_bank_path))?;

    // The word bank is saved whether or not the command succeeded.
    let outcome = run(&args.command, &config, &mut session);
    let saved = session
        .close()
        .with_context(|| format!("Failed to save word bank: {:?}", config.word_bank_path));

    settle(outcome, saved)
}

/// Combine the command result with the save result, losing neither error.
fn settle(outcome: Result<()>, saved: Result<()>) -> Result<()> {
    match (outcome, saved) {
        (Ok(()), saved) => saved,
        (Err(err), Ok(())) => {
            error!(error = %format!("{:#}", err), "command failed");
            Err(err)
        }
        (Err(err), Err(save_err)) => {
            error!(error = %format!("{:#}", err), "command failed");
            error!(error = %format!("{:#}", save_err), "word bank was not saved");
            Err(err.context(format!("word bank was not saved either: {:#}", save_err)))
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: &Command, config: &Config, session: &mut Session<TextFile>) -> Result<()> {
    match command {
        Command::Review { mode } => {
            let mode = mode.unwrap_or(config.default_mode);
            let out = TextFile::new(&config.review_path);
            let written = session
                .generate_review(mode, &mut rand::thread_rng(), &out)
                .with_context(|| format!("Failed to write review: {:?}", config.review_path))?;
            println!(
                "✓ Wrote {} prompts ({}) to {}",
                written,
                mode.name(),
                out.path().display()
            );
        }
        Command::Grade => {
            let answers = TextFile::new(&config.review_path);
            let report_out = TextFile::new(&config.report_path);
            let report = session
                .grade(&answers, &report_out)
                .with_context(|| format!("Failed to grade review: {:?}", config.review_path))?;
            println!(
                "✓ {}/{} correct, {} mistakes written to {}",
                report.correct,
                report.graded,
                report.mistakes.len(),
                report_out.path().display()
            );
        }
    }
    Ok(())
}

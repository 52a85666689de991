use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tsmatch::{evaluate, evaluate_batch, TsQuery, TsVector};

mod cli;
use cli::{Cli, Commands};

const EXIT_NO_MATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Eval { query, vector } => {
            let query: TsQuery = read_json(&query)?;
            let vector: TsVector = read_json(&vector)?;
            let matched = evaluate(&query, &vector).context("query evaluation failed")?;
            println!("{}", matched);
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_NO_MATCH)
            })
        }
        Commands::Filter { query, vectors } => {
            let query: TsQuery = read_json(&query)?;
            let vectors: Vec<TsVector> = read_json(&vectors)?;
            let matches = evaluate_batch(&query, &vectors).context("query evaluation failed")?;
            let hits: Vec<usize> = matches
                .iter()
                .enumerate()
                .filter_map(|(i, &m)| m.then_some(i))
                .collect();
            log::info!("{} of {} vectors matched", hits.len(), vectors.len());
            for i in hits {
                println!("{}", i);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { query, vector } => {
            if let Some(path) = query {
                let query: TsQuery = read_json(&path)?;
                println!("{}", query);
            }
            if let Some(path) = vector {
                let vector: TsVector = read_json(&path)?;
                println!("{}", vector);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

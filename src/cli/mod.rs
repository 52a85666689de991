// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tsmatch command-line interface.
//!
//! Three subcommands: `eval` to test one vector, `filter` to test many, and
//! `show` to print the text form of a query or vector. Inputs are the serde
//! JSON form of the model; there is no text parser here.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tsmatch",
    about = "Evaluate full-text queries against parsed document vectors",
    version
)]
pub struct Cli {
    /// Log evaluation details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a query against one document vector
    ///
    /// Exits 0 on match, 1 on no match and 2 on error.
    Eval {
        /// Path to the query JSON (flat item array)
        #[arg(short, long)]
        query: PathBuf,

        /// Path to the vector JSON (array of lexeme entries)
        #[arg(long)]
        vector: PathBuf,
    },

    /// Print the index of every vector the query matches
    Filter {
        /// Path to the query JSON
        #[arg(short, long)]
        query: PathBuf,

        /// Path to a JSON array of vectors
        #[arg(long)]
        vectors: PathBuf,
    },

    /// Print the text form of a query or a vector
    Show {
        /// Path to a query JSON
        #[arg(short, long, conflicts_with = "vector", required_unless_present = "vector")]
        query: Option<PathBuf>,

        /// Path to a vector JSON
        #[arg(long)]
        vector: Option<PathBuf>,
    },
}

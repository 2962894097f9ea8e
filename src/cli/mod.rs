//! CLI module for the prompt template manager
//!
//! - `serve`: HTTP API server
//! - `search`: interactive debounced template search

pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};

/// Prompt template manager - placeholder templates, folders and batch prompt assembly
#[derive(Parser)]
#[command(name = "prompt-template-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Search templates interactively from stdin
    Search(search::SearchArgs),
}

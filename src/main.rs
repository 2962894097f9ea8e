use clap::Parser;
use prompt_template_manager::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Search(args) => cli::search::run(args).await,
    }
}

mod cli;
mod repl;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; flags and real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.web {
        let config = ottochat_server::ServerConfig::from_env();
        return ottochat_server::serve(config, &cli.web_bind, cli.web_port).await;
    }

    repl::run_repl_mode(&cli).await
}

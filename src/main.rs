mod app;
mod bootstrap;
mod chat;
mod cli;
mod compose;
mod dates;
mod intent;
mod interactive;
mod llm;
mod logging;
mod model;
mod output;
mod prompt;
mod request_engine;
mod session;
mod weather;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli);
    app::run(cli).await
}

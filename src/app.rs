use anyhow::Result;

use crate::bootstrap;
use crate::chat;
use crate::cli::Cli;
use crate::interactive;
use crate::output;
use crate::session::SessionKey;

pub async fn run(cli: Cli) -> Result<()> {
    let runtime = bootstrap::bootstrap(&cli)?;

    if cli.discord {
        let token = chat::load_token(&cli.token_file)?;
        return chat::run_discord(&token, runtime.engine).await;
    }

    if let Some(request) = cli.once.as_deref() {
        let reply = runtime.engine.answer(&SessionKey::Console, request).await;
        output::print_reply(&reply);
        return Ok(());
    }

    interactive::run_interactive(&runtime.engine).await
}

use anyhow::Result;
use std::io::{self, BufRead, Write};

use super::{GOODBYE_MESSAGE, INPUT_PROMPT, is_exit_command};
use crate::output;
use crate::request_engine::TurnEngine;
use crate::session::SessionKey;

pub async fn run(engine: &TurnEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        print!("{}", INPUT_PROMPT);
        io::stdout().flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("{}", GOODBYE_MESSAGE);
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            println!("{}", GOODBYE_MESSAGE);
            break;
        }

        let reply = engine.answer(&SessionKey::Console, input).await;
        output::print_reply(&reply);
    }
    Ok(())
}

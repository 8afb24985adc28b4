use anyhow::Result;
use rustyline::error::ReadlineError;

use super::{GOODBYE_MESSAGE, INPUT_PROMPT, is_exit_command};
use crate::output;
use crate::request_engine::TurnEngine;
use crate::session::SessionKey;

pub async fn run(engine: &TurnEngine) -> Result<()> {
    let mut editor = rustyline::DefaultEditor::new()?;
    loop {
        match editor.readline(INPUT_PROMPT) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(input);
                if is_exit_command(input) {
                    println!("{}", GOODBYE_MESSAGE);
                    break;
                }

                let reply = engine.answer(&SessionKey::Console, input).await;
                output::print_reply(&reply);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", GOODBYE_MESSAGE);
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

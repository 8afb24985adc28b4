mod stdio_loop;
mod tty_loop;

use anyhow::Result;
use std::future::Future;
use std::io::{self, IsTerminal};
use std::pin::Pin;

use crate::request_engine::TurnEngine;

pub const WELCOME_MESSAGE: &str = "Welcome to the Weather Bot! Ask about the weather in any city.";
pub const GOODBYE_MESSAGE: &str = "Goodbye!";
pub const INPUT_PROMPT: &str = "Prompt: ";

trait InteractiveBackend {
    fn run<'a>(&'a self, engine: &'a TurnEngine) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>>;
}

struct TtyBackend;
struct StdioBackend;

impl InteractiveBackend for TtyBackend {
    fn run<'a>(&'a self, engine: &'a TurnEngine) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>> {
        Box::pin(tty_loop::run(engine))
    }
}

impl InteractiveBackend for StdioBackend {
    fn run<'a>(&'a self, engine: &'a TurnEngine) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>> {
        Box::pin(stdio_loop::run(engine))
    }
}

pub async fn run_interactive(engine: &TurnEngine) -> Result<()> {
    println!("{}", WELCOME_MESSAGE);

    let backend: &dyn InteractiveBackend =
        if io::stdin().is_terminal() && io::stdout().is_terminal() {
            &TtyBackend
        } else {
            &StdioBackend
        };
    backend.run(engine).await
}

pub fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command(" Exit \n"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("quit"));
    }
}

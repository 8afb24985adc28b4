mod discord;
mod router;

use anyhow::{Result, anyhow};
use std::path::Path;

pub use discord::run_discord;

pub const TOKEN_MISSING_MESSAGE: &str =
    "Token file not found. Please ensure 'token.txt' contains your bot token.";

/// `DISCORD_TOKEN` wins; otherwise the first non-empty line of `path`.
pub fn load_token(path: &str) -> Result<String> {
    if let Ok(token) = std::env::var("DISCORD_TOKEN")
        && !token.trim().is_empty()
    {
        return Ok(token.trim().to_string());
    }
    read_token_file(Path::new(path))
}

fn read_token_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "cannot read token file");
        anyhow!(TOKEN_MISSING_MESSAGE)
    })?;
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!(TOKEN_MISSING_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("weather-bot-{}-{}", std::process::id(), name))
    }

    #[test]
    fn reads_first_non_empty_line() {
        let path = temp_path("token-ok");
        std::fs::write(&path, "\n  abc.def  \nignored\n").unwrap();
        assert_eq!(read_token_file(&path).unwrap(), "abc.def");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_or_blank_file_is_an_error() {
        let missing = temp_path("token-missing");
        let err = read_token_file(&missing).unwrap_err();
        assert_eq!(err.to_string(), TOKEN_MISSING_MESSAGE);

        let blank = temp_path("token-blank");
        std::fs::write(&blank, "  \n").unwrap();
        assert_eq!(read_token_file(&blank).unwrap_err().to_string(), TOKEN_MISSING_MESSAGE);
        std::fs::remove_file(&blank).unwrap();
    }
}

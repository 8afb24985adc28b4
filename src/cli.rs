use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "weather-bot",
    version,
    about = "LLM-powered conversational weather assistant"
)]
pub struct Cli {
    /// Extraction model name or provider:model (e.g. openai:gpt-3.5-turbo)
    #[arg(short = 'm', long = "model", env = "WEATHER_BOT_MODEL")]
    pub model: Option<String>,

    /// Model used to compose the final reply (same provider as --model)
    #[arg(long = "reply-model", env = "WEATHER_BOT_REPLY_MODEL")]
    pub reply_model: Option<String>,

    /// LLM API key (overrides environment variable)
    #[arg(short = 'k', long = "key")]
    pub key: Option<String>,

    /// Visual Crossing API key (overrides VISUAL_CROSSING_API_KEY)
    #[arg(long = "weather-key")]
    pub weather_key: Option<String>,

    /// Answer a single question and exit
    #[arg(long = "once", conflicts_with = "discord")]
    pub once: Option<String>,

    /// Run as a Discord bot instead of the console loop
    #[arg(long = "discord")]
    pub discord: bool,

    /// File holding the Discord bot token
    #[arg(long = "token-file", default_value = "token.txt")]
    pub token_file: String,
}

mod extractor;
mod parse;

pub use extractor::Extractor;
pub use parse::parse_intent;

/// Requirement value that routes a turn to the small-talk reply template.
pub const GENERAL_INQUIRY: &str = "general inquiry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedIntent {
    Weather(WeatherIntent),
    Other { message: String },
}

/// Entities pulled out of a weather question. Every field is optional: vague
/// follow-ups ("and tomorrow?") leave most of them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherIntent {
    pub tone: Option<String>,
    pub city: Option<String>,
    pub requirement: Option<String>,
    pub date: Option<String>,
    pub phenomenon: Option<String>,
}

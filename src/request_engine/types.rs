use std::fmt;

pub const MISUNDERSTOOD_REPLY: &str = "Could not understand the request. Please try again.";
pub const CHECK_CITY_REPLY: &str = "Oops! It looks like there was an issue with the city name you provided. Could you please check and give me the correct city name?";
pub const GENERIC_FAILURE_REPLY: &str =
    "Sorry, I couldn't process your request. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Start,
    Extracted,
    LookedUp,
    Composed,
    Done,
}

impl fmt::Display for TurnStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnStage::Start => "start",
            TurnStage::Extracted => "extracted",
            TurnStage::LookedUp => "looked_up",
            TurnStage::Composed => "composed",
            TurnStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Extraction produced no usable intent.
    Misunderstood,
    /// The weather lookup failed; the user was asked to check the city.
    LookupFailed,
    /// The composer produced the reply.
    Composed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    pub outcome: TurnOutcome,
    /// Last stage the turn reached before finishing.
    pub stage: TurnStage,
}

impl TurnReply {
    pub(super) fn new(text: impl Into<String>, outcome: TurnOutcome, stage: TurnStage) -> Self {
        Self {
            text: text.into(),
            outcome,
            stage,
        }
    }
}

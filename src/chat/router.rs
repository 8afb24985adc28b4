pub const GREETING_REPLY: &str =
    "Hello, Welcome to the Weather Bot! I'm your Weather Bot. Ask me about the weather in any city!";
pub const FAREWELL_REPLY: &str = "Goodbye! Stay safe and take care!";

const GREETING_KEYWORDS: [&str; 3] = ["hello", "hi", "hey"];
const FAREWELL_KEYWORDS: [&str; 2] = ["goodbye", "bye"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Greeting,
    Farewell,
    /// Normalized text to hand to the turn engine.
    Query(String),
}

impl Route {
    pub fn canned_reply(&self) -> Option<&'static str> {
        match self {
            Route::Greeting => Some(GREETING_REPLY),
            Route::Farewell => Some(FAREWELL_REPLY),
            Route::Query(_) => None,
        }
    }
}

/// Keywords match anywhere in the text, greeting first.
pub fn route_message(content: &str) -> Route {
    let text = strip_mentions(content).trim().to_lowercase();
    if GREETING_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return Route::Greeting;
    }
    if FAREWELL_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return Route::Farewell;
    }
    Route::Query(text)
}

/// Removes user, nickname and role mention markup (`<@1>`, `<@!1>`, `<@&1>`).
pub fn strip_mentions(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("<@") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let id_part = tail.trim_start_matches(['!', '&']);
        let digits = id_part
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(id_part.len());
        if digits > 0 && id_part[digits..].starts_with('>') {
            rest = &id_part[digits + 1..];
        } else {
            out.push_str("<@");
            rest = tail;
        }
    }
    out.push_str(rest);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

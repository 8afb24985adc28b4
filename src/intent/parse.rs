use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use super::{ExtractedIntent, WeatherIntent};

const WEATHER_KEYS: [&str; 5] = ["tone", "city", "requirement", "date", "phenomenon"];

/// Parses the extraction model's answer.
///
/// Accepts bare JSON, fenced JSON, or JSON embedded in prose. Keys are
/// matched case-insensitively. Both `{"category": "other", ...}` and
/// `{"other": "general inquiry", ...}` mark a non-weather question.
pub fn parse_intent(raw: &str, user_input: &str) -> Result<ExtractedIntent> {
    let text = strip_fences(raw.trim());
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => {
            let fragment = extract_first_json_object(&text)
                .or_else(|| extract_first_json_object(raw))
                .ok_or_else(|| anyhow!("extraction output does not contain a JSON object"))?;
            serde_json::from_str(&fragment).with_context(|| "failed to parse JSON fragment")?
        }
    };
    let Value::Object(object) = value else {
        return Err(anyhow!("extraction output is not a JSON object"));
    };
    intent_from_object(object, user_input)
}

fn intent_from_object(object: Map<String, Value>, user_input: &str) -> Result<ExtractedIntent> {
    let fields = object
        .into_iter()
        .map(|(key, value)| (key.trim().to_lowercase(), value))
        .collect::<Map<String, Value>>();
    let field = |name: &str| fields.get(name).and_then(text_value);

    let is_other = field("category").is_some_and(|category| category.eq_ignore_ascii_case("other"))
        || field("other").is_some();
    if is_other {
        let message = field("message").unwrap_or_else(|| user_input.trim().to_string());
        return Ok(ExtractedIntent::Other { message });
    }

    if !WEATHER_KEYS.iter().any(|key| fields.contains_key(*key)) {
        return Err(anyhow!("extraction output has no recognised fields"));
    }

    Ok(ExtractedIntent::Weather(WeatherIntent {
        tone: field("tone").map(|tone| tone.to_lowercase()),
        city: field("city"),
        requirement: field("requirement").map(|requirement| requirement.to_lowercase()),
        date: field("date"),
        phenomenon: field("phenomenon"),
    }))
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() < 6 || !(trimmed.starts_with("```") && trimmed.ends_with("```")) {
        return trimmed.to_string();
    }

    let inner = &trimmed[3..trimmed.len() - 3];
    if !inner.contains('\n') {
        return inner.trim().trim_start_matches("json").trim().to_string();
    }

    let mut lines = trimmed.lines();
    let _ = lines.next();
    let mut out = String::new();
    for line in lines {
        if line.trim() == "```" {
            break;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

fn extract_first_json_object(raw: &str) -> Option<String> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => {
                if depth == 0 {
                    start = Some(idx);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0
                    && let Some(begin) = start
                {
                    return Some(raw[begin..=idx].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(raw: &str) -> WeatherIntent {
        match parse_intent(raw, "input").unwrap() {
            ExtractedIntent::Weather(intent) => intent,
            other => panic!("expected weather intent, got {other:?}"),
        }
    }

    #[test]
    fn parses_plain_weather_json() {
        let intent = weather(
            r#"{"tone":"neutral","city":"Paris","requirement":"temperature","date":"2024-11-16"}"#,
        );
        assert_eq!(intent.tone.as_deref(), Some("neutral"));
        assert_eq!(intent.city.as_deref(), Some("Paris"));
        assert_eq!(intent.requirement.as_deref(), Some("temperature"));
        assert_eq!(intent.date.as_deref(), Some("2024-11-16"));
    }

    #[test]
    fn parses_fenced_json_with_capitalised_keys() {
        let intent = weather("```json\n{\"City\": \"undefined\", \"Requirement\": \"Highest cold temperature\"}\n```");
        assert_eq!(intent.city.as_deref(), Some("undefined"));
        assert_eq!(
            intent.requirement.as_deref(),
            Some("highest cold temperature")
        );
        assert!(intent.date.is_none());
    }

    #[test]
    fn finds_json_inside_prose() {
        let intent = weather(r#"Sure! Here it is: {"tone":"casual","requirement":"fact","phenomenon":"rain"} hope that helps"#);
        assert_eq!(intent.phenomenon.as_deref(), Some("rain"));
        assert!(intent.city.is_none());
    }

    #[test]
    fn accepts_single_line_fence() {
        let intent = weather(r#"```{"city":"Paris","requirement":"temperature"}```"#);
        assert_eq!(intent.city.as_deref(), Some("Paris"));

        let tagged = weather(r#"```json {"city":"Rome"}```"#);
        assert_eq!(tagged.city.as_deref(), Some("Rome"));
    }

    #[test]
    fn accepts_fence_followed_by_prose() {
        let intent = weather("```json\n{\"city\":\"Lima\",\"date\":\"tomorrow\"}\n```\nLet me know if you need more.");
        assert_eq!(intent.city.as_deref(), Some("Lima"));
        assert_eq!(intent.date.as_deref(), Some("tomorrow"));
    }

    #[test]
    fn null_other_key_keeps_weather_fields() {
        let intent = weather(r#"{"city":"Paris","requirement":"temperature","other":null}"#);
        assert_eq!(intent.city.as_deref(), Some("Paris"));
        assert_eq!(intent.requirement.as_deref(), Some("temperature"));
    }

    #[test]
    fn recognises_both_other_shapes() {
        let category = parse_intent(
            r#"{"category":"other","message":"Tell me about space exploration."}"#,
            "ignored",
        )
        .unwrap();
        assert_eq!(
            category,
            ExtractedIntent::Other {
                message: "Tell me about space exploration.".to_string()
            }
        );

        let legacy = parse_intent(r#"{"other":"general inquiry"}"#, " What is your favourite season? ").unwrap();
        assert_eq!(
            legacy,
            ExtractedIntent::Other {
                message: "What is your favourite season?".to_string()
            }
        );
    }

    #[test]
    fn rejects_structurally_invalid_output() {
        assert!(parse_intent("I am not sure what you mean.", "x").is_err());
        assert!(parse_intent("[1, 2, 3]", "x").is_err());
        assert!(parse_intent(r#"{"foo":"bar"}"#, "x").is_err());
        assert!(parse_intent(r#"{"city": "Paris""#, "x").is_err());
    }

    #[test]
    fn blank_and_null_fields_count_as_absent() {
        let intent = weather(r#"{"city":"  ","requirement":null,"date":"tomorrow"}"#);
        assert!(intent.city.is_none());
        assert!(intent.requirement.is_none());
        assert_eq!(intent.date.as_deref(), Some("tomorrow"));
    }
}

use crate::intent::GENERAL_INQUIRY;

pub const MORE_DETAILS_SUFFIX: &str =
    "If you'd like more details or have any specific questions, feel free to ask!";

const GREETING_WORDS: [&str; 6] = ["hello", "hi", "hey", "howdy", "greeting", "greetings"];

/// Whether the reply should invite a follow-up question. Depends only on its
/// three inputs.
pub fn should_offer_details(tone: &str, requirement: &str, user_input: &str) -> bool {
    if tone.eq_ignore_ascii_case("casual") || requirement.eq_ignore_ascii_case(GENERAL_INQUIRY) {
        return false;
    }
    contains_greeting(user_input) || requirement.eq_ignore_ascii_case("other")
}

pub fn apply_details_suffix(reply: String, tone: &str, requirement: &str, user_input: &str) -> String {
    if should_offer_details(tone, requirement, user_input) {
        format!("{} {}", reply.trim_end(), MORE_DETAILS_SUFFIX)
    } else {
        reply
    }
}

fn contains_greeting(input: &str) -> bool {
    input
        .to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casual_tone_and_general_inquiry_never_get_suffix() {
        assert!(!should_offer_details("casual", "other", "hello there"));
        assert!(!should_offer_details("neutral", "general inquiry", "hi!"));
    }

    #[test]
    fn greetings_and_other_requirement_get_suffix() {
        assert!(should_offer_details("neutral", "temperature", "Hey, how warm is Oslo?"));
        assert!(should_offer_details("neutral", "other", "What's up"));
    }

    #[test]
    fn plain_weather_question_is_unchanged() {
        let reply = apply_details_suffix(
            "It'll be 12°C in Paris.".to_string(),
            "neutral",
            "temperature",
            "What's the temperature in Paris tomorrow?",
        );
        assert_eq!(reply, "It'll be 12°C in Paris.");
    }

    #[test]
    fn greeting_word_must_be_a_whole_word() {
        assert!(!should_offer_details("neutral", "humidity", "Which city is the most humid?"));
    }

    #[test]
    fn decision_is_stable_across_calls() {
        let inputs = [
            ("neutral", "temperature", "hi, rain in Rome?"),
            ("casual", "other", "hello"),
            ("neutral", "wind", "wind in Chicago"),
        ];
        for (tone, requirement, input) in inputs {
            assert_eq!(
                should_offer_details(tone, requirement, input),
                should_offer_details(tone, requirement, input)
            );
        }
    }

    #[test]
    fn appends_suffix_after_reply() {
        let reply = apply_details_suffix("Sunny all day! ".to_string(), "neutral", "other", "x");
        assert_eq!(reply, format!("Sunny all day! {}", MORE_DETAILS_SUFFIX));
    }
}

//! Local resolution of the relative date phrases users (and the extraction
//! model) produce, so the weather lookup always receives `yyyy-mm-dd` when the
//! phrase is understood.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves `raw` against `today` and the conversation's last date.
///
/// Unrecognised input is passed through trimmed so provider-side period
/// keywords such as `next7days` keep working.
pub fn resolve_date(raw: &str, today: NaiveDate, last_date: Option<&str>) -> String {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return format_date(today);
    }
    match resolve_normalized(&normalized, today, last_date) {
        Some(date) => format_date(date),
        None => raw.trim().to_string(),
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn resolve_normalized(text: &str, today: NaiveDate, last_date: Option<&str>) -> Option<NaiveDate> {
    if let Some(date) = parse_date(text) {
        return Some(date);
    }

    match text {
        "today" | "now" | "tonight" | "right now" | "currently" | "this morning"
        | "this afternoon" | "this evening" => return Some(today),
        "tomorrow" | "tomorrow morning" | "tomorrow night" => return shift(today, 1),
        "yesterday" => return shift(today, -1),
        "day after tomorrow" | "the day after tomorrow" => return shift(today, 2),
        "day before yesterday" | "the day before yesterday" => return shift(today, -2),
        "next week" | "a week from now" | "in a week" => return shift(today, 7),
        "last week" | "a week ago" => return shift(today, -7),
        "that day" | "same day" | "that same day" | "the same day" | "on that day" => {
            return Some(last_date.and_then(parse_date).unwrap_or(today));
        }
        _ => {}
    }

    if let Some(date) = parse_offset(text, today) {
        return Some(date);
    }
    if let Some(date) = parse_weekday_phrase(text, today) {
        return Some(date);
    }
    parse_day_of_month(text, today)
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['?', '!', '.', ','])
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// `2 days ago`, `in 3 days`, `5 days from now`, `two weeks ago`, `in 1 week`.
fn parse_offset(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words = text.split(' ').collect::<Vec<_>>();
    let (amount, unit, sign) = match words.as_slice() {
        [amount, unit, "ago"] => (*amount, *unit, -1),
        ["in", amount, unit] => (*amount, *unit, 1),
        [amount, unit, "from", "now"] | [amount, unit, "later"] => (*amount, *unit, 1),
        _ => return None,
    };
    let amount = parse_count(amount)?;
    let days = match unit {
        "day" | "days" => amount,
        "week" | "weeks" => amount * 7,
        _ => return None,
    };
    shift(today, sign * days)
}

fn parse_count(word: &str) -> Option<i64> {
    if let Ok(value) = word.parse::<i64>() {
        return (0..=366).contains(&value).then_some(value);
    }
    let value = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(value)
}

/// `friday`, `this friday`, `on friday` pick the upcoming one (today counts);
/// `next friday` is strictly after today and `last friday` strictly before.
fn parse_weekday_phrase(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (modifier, name) = match text.split_once(' ') {
        Some((modifier, name)) => (Some(modifier), name),
        None => (None, text),
    };
    let weekday = parse_weekday(name)?;
    let today_index = i64::from(today.weekday().num_days_from_monday());
    let target_index = i64::from(weekday.num_days_from_monday());
    let ahead = (target_index - today_index).rem_euclid(7);

    match modifier {
        None | Some("this") | Some("on") | Some("coming") => shift(today, ahead),
        Some("next") => shift(today, if ahead == 0 { 7 } else { ahead }),
        Some("last") | Some("past") => {
            let behind = (today_index - target_index).rem_euclid(7);
            shift(today, -(if behind == 0 { 7 } else { behind }))
        }
        Some(_) => None,
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// A bare day number means that day of the current month and year.
fn parse_day_of_month(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.strip_prefix("the ").unwrap_or(text);
    let text = text.strip_prefix("on the ").unwrap_or(text);
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
        .unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let day = digits.parse::<u32>().ok()?;
    today.with_day(day)
}

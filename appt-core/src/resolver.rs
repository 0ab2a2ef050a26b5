//! Free-text date resolution.
//!
//! Turns expressions like `"next friday"`, `"tomorrow"`, `"dec 15"` or
//! `"2025-01-20"` into a concrete [`NaiveDate`], anchored to a caller-supplied
//! "today". Relative phrases lean toward the future: a bare weekday is the
//! coming one, and a month-day that already passed rolls into next year.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::keywords::{Keyword, Keywords};

/// Default accepted input date formats (parsing only).
pub const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%d-%m-%Y"];

/// No date could be determined from the input.
///
/// Returned when neither the general pass nor the weekday-phrase fallback can
/// read the text. The caller decides how to ask the user again; the resolver
/// never substitutes a default date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not determine a date from {input:?}")]
pub struct DateUnresolved {
    pub input: String,
}

/// Configuration options for [`resolve`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ResolveOptions<'a> {
    /// The date to use as "today" for relative expressions.
    /// Defaults to the current local date.
    pub anchor: Option<NaiveDate>,
    /// A slice of `chrono` format strings to try for absolute dates.
    pub formats: Option<&'a [&'a str]>,
}

const WEEKDAYS: &[(Keyword, Weekday)] = &[
    (Keyword::Monday, Weekday::Mon),
    (Keyword::Tuesday, Weekday::Tue),
    (Keyword::Wednesday, Weekday::Wed),
    (Keyword::Thursday, Weekday::Thu),
    (Keyword::Friday, Weekday::Fri),
    (Keyword::Saturday, Weekday::Sat),
    (Keyword::Sunday, Weekday::Sun),
];

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

struct Patterns {
    // "in 3 days", "in 2 weeks"; count bounded so the arithmetic stays in range
    in_units: Regex,
    // "15 dec", "15th december"
    day_month: Regex,
    // "dec 15", "december 15th"
    month_day: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: Lazy<Patterns> = Lazy::new(|| Patterns {
        in_units: Regex::new(r"^in\s+(\d{1,4})\s+(days?|weeks?)$").unwrap(),
        day_month: Regex::new(&format!(r"^(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})$")).unwrap(),
        month_day: Regex::new(&format!(r"^({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)?$")).unwrap(),
    });
    &PATTERNS
}

/// Resolves a free-text date expression into a calendar date.
///
/// The input is trimmed and matched case-insensitively. Resolution runs in
/// two passes:
///
/// 1. **General parsing** of the whole text: relative keywords (`today`,
///    `tomorrow`, `yesterday` and their synonyms), absolute dates in any of
///    the configured formats, month-day forms (`dec 15`), `in N days/weeks`
///    offsets, and bare weekday names (resolved to the next occurrence,
///    counting the anchor itself).
/// 2. **Phrase fallback** for `next <weekday>` / `this <weekday>` found
///    anywhere in the text. `next` never lands on the anchor: said on the
///    matching weekday it means seven days later. `this` allows the anchor.
///    When both qualifiers appear, `next` wins; when several weekday names
///    appear, the earliest in the text wins.
///
/// Anything else is a [`DateUnresolved`] error, including empty input.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use appt_core::resolver::{ResolveOptions, resolve};
/// let opts = ResolveOptions {
///     anchor: Some(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()), // a Friday
///     ..Default::default()
/// };
///
/// let date = resolve("next friday", Some(opts)).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
///
/// assert!(resolve("gibberish not a date", Some(opts)).is_err());
/// ```
pub fn resolve(text: &str, options: Option<ResolveOptions>) -> Result<NaiveDate, DateUnresolved> {
    let options = options.unwrap_or_default();
    let anchor = options.anchor.unwrap_or_else(|| Local::now().date_naive());
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);

    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(DateUnresolved {
            input: text.to_string(),
        });
    }

    parse_general(&normalized, anchor, formats)
        .or_else(|| parse_qualified_weekday(&normalized, anchor))
        .ok_or_else(|| DateUnresolved {
            input: text.to_string(),
        })
}

/// General pass: the whole input must be a single recognizable expression.
fn parse_general(s: &str, anchor: NaiveDate, formats: &[&str]) -> Option<NaiveDate> {
    if Keywords::matches(Keyword::Today, s) {
        return Some(anchor);
    }
    if Keywords::matches(Keyword::Tomorrow, s) {
        return Some(anchor + Duration::days(1));
    }
    if Keywords::matches(Keyword::Yesterday, s) {
        return Some(anchor - Duration::days(1));
    }

    if let Some(date) = formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .next()
    {
        return Some(date);
    }

    if let Some(date) = parse_month_day(s, anchor) {
        return Some(date);
    }
    if let Some(date) = parse_offset(s, anchor) {
        return Some(date);
    }

    if let Some(weekday) = weekday_token(s) {
        let days_ahead = days_until(anchor.weekday(), weekday);
        return Some(anchor + Duration::days(days_ahead));
    }
    None
}

/// Fallback pass for `("next" | "this") <weekday>` phrases.
fn parse_qualified_weekday(s: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let has_next = Keywords::find_position(Keyword::Next, s).is_some();
    let has_this = Keywords::find_position(Keyword::This, s).is_some();
    if !has_next && !has_this {
        return None;
    }

    let weekday = WEEKDAYS
        .iter()
        .filter_map(|&(kw, wd)| Keywords::find_position(kw, s).map(|pos| (pos, wd)))
        .min_by_key(|&(pos, _)| pos)
        .map(|(_, wd)| wd)?;

    let mut days_ahead = days_until(anchor.weekday(), weekday);
    // "next monday" said on a Monday is a week out, never today.
    if has_next && days_ahead == 0 {
        days_ahead = 7;
    }
    Some(anchor + Duration::days(days_ahead))
}

/// Days from `current` forward to the closest `target`, zero when they match.
fn days_until(current: Weekday, target: Weekday) -> i64 {
    ((target.num_days_from_monday() + 7 - current.num_days_from_monday()) % 7) as i64
}

/// The input as a single weekday token ("friday", "fri", registered synonyms).
fn weekday_token(s: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(kw, _)| Keywords::matches(*kw, s))
        .map(|&(_, wd)| wd)
}

/// Month-day forms, resolved to the next occurrence on or after the anchor.
fn parse_month_day(s: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let p = patterns();
    let (day, month) = if let Some(caps) = p.day_month.captures(s) {
        (caps[1].parse::<u32>().ok()?, month_number(&caps[2])?)
    } else if let Some(caps) = p.month_day.captures(s) {
        (caps[2].parse::<u32>().ok()?, month_number(&caps[1])?)
    } else {
        return None;
    };

    // An invalid date this year (feb 29 off-cycle) may still exist next year.
    match NaiveDate::from_ymd_opt(anchor.year(), month, day) {
        Some(date) if date >= anchor => Some(date),
        _ => NaiveDate::from_ymd_opt(anchor.year() + 1, month, day),
    }
}

/// `in N days` / `in N weeks` offsets from the anchor.
fn parse_offset(s: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let caps = patterns().in_units.captures(s)?;
    let n: i64 = caps[1].parse().ok()?;
    let days = if caps[2].starts_with("week") { n * 7 } else { n };
    anchor.checked_add_signed(Duration::days(days))
}

fn month_number(name: &str) -> Option<u32> {
    // The month regex already constrained the spelling; prefixes are enough.
    let n = match name {
        s if s.starts_with("jan") => 1,
        s if s.starts_with("feb") => 2,
        s if s.starts_with("mar") => 3,
        s if s.starts_with("apr") => 4,
        "may" => 5,
        s if s.starts_with("jun") => 6,
        s if s.starts_with("jul") => 7,
        s if s.starts_with("aug") => 8,
        s if s.starts_with("sep") => 9,
        s if s.starts_with("oct") => 10,
        s if s.starts_with("nov") => 11,
        s if s.starts_with("dec") => 12,
        _ => return None,
    };
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn opts(anchor: NaiveDate) -> Option<ResolveOptions<'static>> {
        Some(ResolveOptions {
            anchor: Some(anchor),
            ..Default::default()
        })
    }

    #[test]
    fn next_monday_always_lands_in_the_coming_week() {
        // One anchor per weekday, Monday 2024-06-03 through Sunday 2024-06-09.
        for offset in 0..7 {
            let anchor = d(2024, 6, 3) + Duration::days(offset);
            let resolved = resolve("next monday", opts(anchor)).unwrap();
            assert_eq!(resolved.weekday(), Weekday::Mon);
            let ahead = (resolved - anchor).num_days();
            assert!((1..=7).contains(&ahead), "{ahead} days ahead of {anchor}");
        }
    }

    #[test]
    fn this_and_next_differ_on_the_matching_weekday() {
        let monday = d(2024, 6, 3);
        assert_eq!(resolve("this monday", opts(monday)).unwrap(), monday);
        assert_eq!(
            resolve("next monday", opts(monday)).unwrap(),
            monday + Duration::days(7)
        );
    }

    #[test]
    fn resolves_concrete_friday_anchor() {
        let anchor = d(2024, 6, 7); // Friday
        assert_eq!(resolve("next friday", opts(anchor)).unwrap(), d(2024, 6, 14));
        assert_eq!(resolve("this friday", opts(anchor)).unwrap(), d(2024, 6, 7));
        assert_eq!(resolve("next monday", opts(anchor)).unwrap(), d(2024, 6, 10));
    }

    #[test]
    fn resolution_is_deterministic() {
        let anchor = d(2024, 6, 7);
        let first = resolve("next tuesday", opts(anchor)).unwrap();
        let second = resolve("next tuesday", opts(anchor)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_and_blank_input_fail() {
        let anchor = d(2024, 6, 7);
        assert!(resolve("", opts(anchor)).is_err());
        assert!(resolve("   \t ", opts(anchor)).is_err());
    }

    #[test]
    fn gibberish_fails_and_keeps_the_input() {
        let anchor = d(2024, 6, 7);
        let err = resolve("gibberish not a date", opts(anchor)).unwrap_err();
        assert_eq!(err.input, "gibberish not a date");
    }

    #[test]
    fn next_wins_when_both_qualifiers_appear() {
        let monday = d(2024, 6, 3);
        assert_eq!(
            resolve("this next monday", opts(monday)).unwrap(),
            monday + Duration::days(7)
        );
    }

    #[test]
    fn earliest_weekday_in_the_text_wins() {
        let anchor = d(2024, 6, 7); // Friday
        assert_eq!(
            resolve("next friday or saturday", opts(anchor)).unwrap(),
            d(2024, 6, 14)
        );
    }

    #[test]
    fn qualifier_without_weekday_fails() {
        let anchor = d(2024, 6, 7);
        assert!(resolve("next", opts(anchor)).is_err());
        assert!(resolve("next week sometime", opts(anchor)).is_err());
    }

    #[test]
    fn embedded_weekday_names_do_not_match() {
        let anchor = d(2024, 6, 7);
        assert!(resolve("next fridays", opts(anchor)).is_err());
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        let anchor = d(2024, 6, 7);
        assert_eq!(
            resolve("  Next FRIDAY  ", opts(anchor)).unwrap(),
            d(2024, 6, 14)
        );
    }

    #[test]
    fn relative_keywords_resolve_against_the_anchor() {
        let anchor = d(2024, 6, 7);
        assert_eq!(resolve("today", opts(anchor)).unwrap(), anchor);
        assert_eq!(resolve("tomorrow", opts(anchor)).unwrap(), d(2024, 6, 8));
        assert_eq!(resolve("yesterday", opts(anchor)).unwrap(), d(2024, 6, 6));
    }

    #[test]
    fn absolute_dates_parse_with_default_formats() {
        let anchor = d(2024, 6, 7);
        assert_eq!(resolve("2025-01-20", opts(anchor)).unwrap(), d(2025, 1, 20));
        assert_eq!(resolve("20/01/2025", opts(anchor)).unwrap(), d(2025, 1, 20));
        assert_eq!(resolve("20250120", opts(anchor)).unwrap(), d(2025, 1, 20));
    }

    #[test]
    fn custom_formats_override_defaults() {
        let anchor = d(2024, 6, 7);
        let fmts = &["%m/%d/%Y"];
        let custom = Some(ResolveOptions {
            anchor: Some(anchor),
            formats: Some(fmts),
        });
        assert_eq!(resolve("01/20/2025", custom).unwrap(), d(2025, 1, 20));
        assert!(resolve("2025-01-20", custom).is_err());
    }

    #[test]
    fn month_day_forms_prefer_the_future() {
        let anchor = d(2024, 6, 7);
        assert_eq!(resolve("dec 15", opts(anchor)).unwrap(), d(2024, 12, 15));
        assert_eq!(resolve("15th december", opts(anchor)).unwrap(), d(2024, 12, 15));
        // Already passed this year, rolls into the next.
        assert_eq!(resolve("jan 2", opts(anchor)).unwrap(), d(2025, 1, 2));
        // The anchor's own date stays put.
        assert_eq!(resolve("7 june", opts(anchor)).unwrap(), anchor);
    }

    #[test]
    fn offsets_add_days_and_weeks() {
        let anchor = d(2024, 6, 7);
        assert_eq!(resolve("in 3 days", opts(anchor)).unwrap(), d(2024, 6, 10));
        assert_eq!(resolve("in 2 weeks", opts(anchor)).unwrap(), d(2024, 6, 21));
    }

    #[test]
    fn bare_weekdays_lean_forward() {
        let saturday = d(2024, 6, 8);
        assert_eq!(resolve("friday", opts(saturday)).unwrap(), d(2024, 6, 14));
        // The anchor's own weekday resolves to the anchor itself.
        assert_eq!(resolve("saturday", opts(saturday)).unwrap(), saturday);
    }

    #[test]
    fn weekday_abbreviations_resolve() {
        let anchor = d(2024, 6, 7); // Friday
        assert_eq!(resolve("next fri", opts(anchor)).unwrap(), d(2024, 6, 14));
        assert_eq!(resolve("this sat", opts(anchor)).unwrap(), d(2024, 6, 8));
    }
}

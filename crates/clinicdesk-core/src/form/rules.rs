//! Reusable validation rules.
//!
//! Each constructor captures its error message and returns a [`Rule`].
//! Rules see only non-blank values and ignore values of a shape they do
//! not check, so they can be stacked freely.

use std::sync::{Arc, LazyLock};

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::date::normalize_date;
use crate::utils::digits_only;
use crate::value::FieldValue;

use super::descriptor::Rule;
use super::draft::Draft;

fn text_rule<F>(message: &str, fails: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let message = message.to_string();
    Arc::new(move |value: &FieldValue, _draft: &Draft| match value {
        FieldValue::Text(s) if fails(s) => Some(message.clone()),
        _ => None,
    })
}

/// At least `min` characters after trimming.
pub fn min_len(min: usize, message: &str) -> Rule {
    text_rule(message, move |s| s.trim().chars().count() < min)
}

/// At most `max` characters after trimming.
pub fn max_len(max: usize, message: &str) -> Rule {
    text_rule(message, move |s| s.trim().chars().count() > max)
}

/// Exactly `count` digits, ignoring punctuation.
pub fn digits_len(count: usize, message: &str) -> Rule {
    text_rule(message, move |s| digits_only(s).len() != count)
}

/// Between `min` and `max` digits inclusive, ignoring punctuation.
pub fn digits_between(min: usize, max: usize, message: &str) -> Rule {
    text_rule(message, move |s| {
        let n = digits_only(s).len();
        n < min || n > max
    })
}

/// Rejects numbers made of one repeated digit, such as `111.111.111-11`.
pub fn not_repeated_digits(message: &str) -> Rule {
    text_rule(message, |s| {
        let digits = digits_only(s);
        let mut chars = digits.chars();
        match chars.next() {
            Some(first) => digits.len() > 1 && chars.all(|c| c == first),
            None => false,
        }
    })
}

/// `local@domain.tld` with no whitespace.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Two uppercase letters, a hyphen, five digits: `SP-12345`.
static CRO_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}-\d{5}$").expect("Invalid CRO regex"));

pub fn email(message: &str) -> Rule {
    text_rule(message, |s| !EMAIL_REGEX.is_match(s))
}

pub fn cro_format(message: &str) -> Rule {
    text_rule(message, |s| !CRO_REGEX.is_match(s))
}

/// Value must be one of `options`, compared exactly.
pub fn one_of(options: &'static [&'static str], message: &str) -> Rule {
    text_rule(message, move |s| !options.iter().any(|option| *option == s))
}

/// Date must not be later than `limit`.
pub fn date_not_after(limit: NaiveDate, message: &str) -> Rule {
    let message = message.to_string();
    Arc::new(move |value: &FieldValue, _draft: &Draft| match normalize_date(value) {
        Some(day) if day.date() > limit => Some(message.clone()),
        _ => None,
    })
}

/// Completed years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age at `today` must lie within `min..=max` completed years.
pub fn age_between(today: NaiveDate, min: i32, max: i32, too_young: &str, too_old: &str) -> Rule {
    let too_young = too_young.to_string();
    let too_old = too_old.to_string();
    Arc::new(move |value: &FieldValue, _draft: &Draft| {
        let birth = normalize_date(value)?.date();
        let age = age_on(birth, today);
        if age < min {
            Some(too_young.clone())
        } else if age > max {
            Some(too_old.clone())
        } else {
            None
        }
    })
}

/// Number strictly greater than zero.
pub fn positive(message: &str) -> Rule {
    let message = message.to_string();
    Arc::new(move |value: &FieldValue, _draft: &Draft| match value {
        FieldValue::Number(n) if *n <= 0.0 => Some(message.clone()),
        _ => None,
    })
}

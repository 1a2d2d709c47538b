//! In-memory search over record collections.
//!
//! A [`FilterQuery`] combines a free-text needle searched across a set of
//! named fields with exact-match predicates. Date-bearing fields are
//! compared by calendar day, whatever shape they arrive in.
//!
//! [`SearchState`] keeps the search box and filter chips of a list view
//! and builds the query from them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::date::{normalize_date, CalendarDate};
use crate::value::FieldValue;

/// Records that expose named fields to the filter engine.
pub trait Filterable {
    fn field(&self, key: &str) -> Option<FieldValue>;
}

impl Filterable for Value {
    fn field(&self, key: &str) -> Option<FieldValue> {
        self.get(key).map(FieldValue::from_json)
    }
}

impl Filterable for serde_json::Map<String, Value> {
    fn field(&self, key: &str) -> Option<FieldValue> {
        self.get(key).map(FieldValue::from_json)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub text: String,
    pub fields: Vec<String>,
    pub predicates: BTreeMap<String, FieldValue>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn predicate(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.predicates.insert(field.into(), value.into());
        self
    }

    /// True when the query cannot exclude anything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.predicates.values().all(is_vacuous)
    }
}

/// Filter `records` by `query`, preserving their order.
pub fn filter<'a, T: Filterable>(records: &'a [T], query: &FilterQuery) -> Vec<&'a T> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.text.to_lowercase();
    records
        .iter()
        .filter(|record| matches_prepared(*record, query, &needle))
        .collect()
}

/// Whether a single record passes `query`.
pub fn matches<T: Filterable>(record: &T, query: &FilterQuery) -> bool {
    matches_prepared(record, query, &query.text.to_lowercase())
}

fn matches_prepared<T: Filterable>(record: &T, query: &FilterQuery, needle: &str) -> bool {
    let text_ok = needle.is_empty()
        || query
            .fields
            .iter()
            .filter_map(|f| record.field(f))
            .any(|value| text_matches(&value, needle));

    text_ok
        && query
            .predicates
            .iter()
            .all(|(f, expected)| predicate_matches(record.field(f).as_ref(), expected))
}

/// `needle` must already be lowercased.
fn text_matches(value: &FieldValue, needle: &str) -> bool {
    if let Some(date) = normalize_date(value) {
        return date.display().contains(needle) || date.iso().contains(needle);
    }

    value
        .to_search_text()
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

fn is_vacuous(expected: &FieldValue) -> bool {
    expected.is_blank()
}

/// Type-appropriate equality of one predicate.
///
/// Text compares as whole strings after lowercasing, so `"ativo"` selects a
/// field holding `"ATIVO"` but not `"inativo"`. Lowercasing keeps predicates
/// consistent with free-text search, where case never matters. Booleans and
/// numbers compare strictly. Dates compare by calendar day. Mixed kinds fall
/// back to their trimmed text forms.
fn predicate_matches(actual: Option<&FieldValue>, expected: &FieldValue) -> bool {
    if is_vacuous(expected) {
        return true;
    }
    let Some(actual) = actual else {
        return false;
    };

    if let Some(result) = date_equality(actual, expected) {
        return result;
    }

    match (actual, expected) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
        (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
        (a, b) => match (a.to_search_text(), b.to_search_text()) {
            (Some(a), Some(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
            _ => false,
        },
    }
}

/// Calendar-day equality when either side is a date, or when both sides
/// are text that parses as one. `None` means "not a date comparison".
fn date_equality(actual: &FieldValue, expected: &FieldValue) -> Option<bool> {
    let actual_day = normalize_date(actual);
    let expected_day = normalize_date(expected);
    let either_native = matches!(actual, FieldValue::Date(_)) || matches!(expected, FieldValue::Date(_));

    match (actual_day, expected_day) {
        (Some(a), Some(b)) => Some(a == b),
        _ if either_native => Some(false),
        _ => None,
    }
}

/// Search box plus filter chips for a list view.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    search: String,
    fields: Vec<String>,
    filters: BTreeMap<String, FieldValue>,
}

impl SearchState {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search: String::new(),
            fields: fields.into_iter().map(Into::into).collect(),
            filters: BTreeMap::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn filters(&self) -> &BTreeMap<String, FieldValue> {
        &self.filters
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.filters.insert(field.into(), value.into());
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.filters.remove(field);
    }

    /// Drop every filter and the search text.
    pub fn clear_all(&mut self) {
        self.filters.clear();
        self.search.clear();
    }

    /// Filter `field` to the day written as `DD/MM/YYYY`.
    ///
    /// Returns false, leaving the filters unchanged, if the text is not a date.
    pub fn search_by_date(&mut self, field: impl Into<String>, text: &str) -> bool {
        match CalendarDate::parse(text) {
            Some(day) => {
                self.filters.insert(field.into(), FieldValue::Date(day.date()));
                true
            }
            None => false,
        }
    }

    pub fn query(&self) -> FilterQuery {
        FilterQuery {
            text: self.search.clone(),
            fields: self.fields.clone(),
            predicates: self.filters.clone(),
        }
    }

    pub fn apply<'a, T: Filterable>(&self, records: &'a [T]) -> Vec<&'a T> {
        filter(records, &self.query())
    }
}

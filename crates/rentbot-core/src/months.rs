//! Russian month vocabularies.
//!
//! Registry keys and replies use the genitive case ("января"); guests and the
//! admin type nominative or abbreviated forms ("январь", "янв").

use crate::domain::FullMonthName;

/// Genitive month names in calendar order. Prefix resolution depends on this order.
pub const GENITIVE_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Nominative and abbreviated forms mapped to their genitive form.
const NOMINATIVE_TO_GENITIVE: [(&str, &str); 23] = [
    ("январь", "января"),
    ("февраль", "февраля"),
    ("март", "марта"),
    ("апрель", "апреля"),
    ("май", "мая"),
    ("июнь", "июня"),
    ("июль", "июля"),
    ("август", "августа"),
    ("сентябрь", "сентября"),
    ("октябрь", "октября"),
    ("ноябрь", "ноября"),
    ("декабрь", "декабря"),
    ("янв", "января"),
    ("фев", "февраля"),
    ("мар", "марта"),
    ("апр", "апреля"),
    ("июн", "июня"),
    ("июл", "июля"),
    ("авг", "августа"),
    ("сен", "сентября"),
    ("окт", "октября"),
    ("ноя", "ноября"),
    ("дек", "декабря"),
];

/// Month alternatives accepted inside guest messages, in match priority order.
pub const MESSAGE_MONTH_PATTERN: &str = "января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря|январь|февраль|март|апрель|май|июнь|июль|август|сентябрь|октябрь|ноябрь|декабрь|янв|фев|мар|апр|июн|июл|авг|сен|окт|ноя|дек";

/// Resolve admin input to the first genitive month (calendar order) it prefixes.
///
/// Matching is case-insensitive. Input is not trimmed: `"янв "` resolves to nothing.
pub fn resolve_prefix(input: &str) -> Option<FullMonthName> {
    let needle = input.to_lowercase();
    GENITIVE_MONTHS
        .iter()
        .find(|full| full.starts_with(&needle))
        .map(|full| FullMonthName(capitalize(full)))
}

/// Genitive form of a nominative or abbreviated token; unknown tokens pass through.
pub fn to_genitive(token: &str) -> String {
    let lower = token.to_lowercase();
    NOMINATIVE_TO_GENITIVE
        .iter()
        .find(|(nominative, _)| *nominative == lower)
        .map(|(_, genitive)| (*genitive).to_string())
        .unwrap_or_else(|| token.to_string())
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

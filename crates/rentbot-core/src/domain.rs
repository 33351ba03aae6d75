/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Canonical genitive month name with the first letter capitalized ("Января").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FullMonthName(pub String);

impl FullMonthName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FullMonthName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

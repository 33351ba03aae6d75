use std::{env, path::PathBuf};

use crate::{errors::Error, Result};

pub const DEFAULT_LINKS_FILE: &str = "./links.txt";

/// Host details interpolated into the guest welcome message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostProfile {
    pub name: String,
    /// City name as it reads after "в" ("Казани").
    pub city: String,
    pub phone: String,
}

impl Default for HostProfile {
    fn default() -> Self {
        Self {
            name: "Руслан".to_string(),
            city: "Казани".to_string(),
            phone: "+7(904)661-09-49".to_string(),
        }
    }
}

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Compared verbatim against the sender's numeric id rendered as a string.
    pub admin_id: String,
    pub links_file: PathBuf,
    pub host: HostProfile,
}

impl Config {
    /// Load from `.env` (if present) and the process environment.
    ///
    /// Variables already set in the environment win over `.env` entries. A
    /// missing `.env` is fine; a malformed one is a config error.
    pub fn load() -> Result<Self> {
        load_dotenv(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let admin_id = lookup("ADMIN_ID")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| Error::Config("ADMIN_ID environment variable is required".to_string()))?;

        let links_file = PathBuf::from(
            lookup("LINKS_FILE_PATH")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_LINKS_FILE.to_string()),
        );

        let defaults = HostProfile::default();
        let host = HostProfile {
            name: lookup("HOST_NAME").and_then(non_empty).unwrap_or(defaults.name),
            city: lookup("HOST_CITY").and_then(non_empty).unwrap_or(defaults.city),
            phone: lookup("HOST_PHONE")
                .and_then(non_empty)
                .unwrap_or(defaults.phone),
        };

        Ok(Self {
            telegram_bot_token,
            admin_id,
            links_file,
            host,
        })
    }

    /// File name of the links store, for user-facing messages.
    pub fn links_file_name(&self) -> String {
        self.links_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.links_file.display().to_string())
    }
}

fn load_dotenv(outcome: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env: {e}"))),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

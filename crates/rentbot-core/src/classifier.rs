//! Guest message classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{months, templates::RECEIPT_URL_PREFIX};

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)([0-9]{{1,2}})(?:[\s.,-]+)([0-9]{{1,2}})\s*({})",
        months::MESSAGE_MONTH_PATTERN
    ))
    .expect("valid date range regex")
});

// Fallback for "с 14.03 по 21 марта": the start day may carry a numeric
// month and the days may be joined with "по". Only consulted when the plain
// pattern finds nothing, so its captures never override the plain ones.
static DATE_RANGE_PO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)([0-9]{{1,2}})(?:\.[0-9]{{1,2}})?(?:[\s.,-]+(?:по\s+)?)([0-9]{{1,2}})\s*({})",
        months::MESSAGE_MONTH_PATTERN
    ))
    .expect("valid date range regex")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// "с 14 по 21 марта"-style booking message.
    DateRange {
        start_day: String,
        end_day: String,
        /// Token as typed by the guest ("июл", "Марта").
        month_token: String,
    },
    /// Link to a receipt from the self-employed tax service.
    Receipt { url: String },
    Unclassified,
}

/// Date ranges win over receipt links.
pub fn classify(text: &str) -> Classification {
    let caps = DATE_RANGE_RE
        .captures(text)
        .or_else(|| DATE_RANGE_PO_RE.captures(text));
    if let Some(caps) = caps {
        return Classification::DateRange {
            start_day: caps[1].to_string(),
            end_day: caps[2].to_string(),
            month_token: caps[3].to_string(),
        };
    }

    if text.starts_with(RECEIPT_URL_PREFIX) {
        return Classification::Receipt {
            url: text.to_string(),
        };
    }

    Classification::Unclassified
}

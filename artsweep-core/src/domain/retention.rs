//! Retention period domain type

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long artifacts are kept, in the service's relative-time notation
///
/// The value (e.g. `30d`) is passed verbatim as the `$before` operand of the
/// search query. Malformed values are rejected by the service, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetentionPeriod(String);

impl RetentionPeriod {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date the retention window starts at, relative to `today`
    ///
    /// Only day (`30d`) and week (`4w`) forms are understood. The result is
    /// informational and never used to select artifacts.
    pub fn cutoff_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let value = self.0.trim();
        let split = value.find(|c: char| !c.is_ascii_digit())?;
        let (amount, unit) = value.split_at(split);
        let amount: u64 = amount.parse().ok()?;

        let days = match unit {
            "d" => amount,
            "w" => amount.checked_mul(7)?,
            _ => return None,
        };

        today.checked_sub_days(Days::new(days))
    }
}

impl fmt::Display for RetentionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RetentionPeriod {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// 📅 Period Keys - identify a reporting interval (usually a fiscal year)
//
// Filings write comparative columns as {"2024": .., "2023": ..}; the
// declared primary period is often a bare integer. Both spell the same key.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A reporting period key, e.g. `"2023"`.
///
/// Keys are trimmed on construction and ordered lexically, which matches
/// chronological order for the year-shaped keys the extraction layer emits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        PeriodKey(key.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty keys carry no period and are ignored by discovery.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i32> for PeriodKey {
    fn from(year: i32) -> Self {
        PeriodKey(year.to_string())
    }
}

impl From<&str> for PeriodKey {
    fn from(key: &str) -> Self {
        PeriodKey::new(key)
    }
}

impl From<String> for PeriodKey {
    fn from(key: String) -> Self {
        PeriodKey::new(key)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => PeriodKey::new(text),
            Raw::Number(n) => PeriodKey(n.to_string()),
        })
    }
}

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::calendar::{Matcher, StoredOverride};
use crate::time::Date;

/// The on disk form of the holiday override store.
///
/// ```toml
/// [[override]]
/// name = "Independence Day"
/// artwork = "art/IndependenceDay.png"
/// closed = true
///
/// [[override]]
/// date = 2025-10-31
/// artwork = "art/Halloween.png"
///
/// [[override]]
/// start = 2025-04-18
/// end = 2025-04-20
/// closed = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverrideFile {
    #[serde(default, rename = "override")]
    overrides: Vec<OverrideEntry>,
}

impl OverrideFile {
    pub fn into_stored(self) -> Result<Vec<StoredOverride>, InvalidOverride> {
        self.overrides
            .into_iter()
            .map(OverrideEntry::into_stored)
            .collect()
    }
}

/// One override record. Exactly one matcher must be present: a holiday
/// `name`, a literal `date`, or a `start`/`end` range (inclusive on both
/// ends).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::utils::serde_toml_local_date::option::deserialize"
    )]
    date: Option<Date>,
    #[serde(
        default,
        deserialize_with = "crate::utils::serde_toml_local_date::option::deserialize"
    )]
    start: Option<Date>,
    #[serde(
        default,
        deserialize_with = "crate::utils::serde_toml_local_date::option::deserialize"
    )]
    end: Option<Date>,
    #[serde(default)]
    artwork: Option<PathBuf>,
    #[serde(default)]
    closed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOverride {
    #[error("an override needs a `name`, a `date` or a `start`/`end` range")]
    MissingMatcher,
    #[error("an override must have exactly one of `name`, `date` and `start`/`end`")]
    ConflictingMatchers,
    #[error("a range override needs both `start` and `end`")]
    HalfOpenRange,
    #[error("range override ends ({end}) before it starts ({start})")]
    ReversedRange { start: Date, end: Date },
}

impl OverrideEntry {
    pub fn into_stored(self) -> Result<StoredOverride, InvalidOverride> {
        let matcher = self.matcher()?;

        Ok(StoredOverride::new(matcher, self.artwork, self.closed))
    }

    fn matcher(&self) -> Result<Matcher, InvalidOverride> {
        let has_range = self.start.is_some() || self.end.is_some();

        match (&self.name, self.date, has_range) {
            (Some(name), None, false) => Ok(Matcher::Name(name.clone())),
            (None, Some(date), false) => Ok(Matcher::Day(date)),
            (None, None, true) => match (self.start, self.end) {
                (Some(start), Some(end)) if start > end => {
                    Err(InvalidOverride::ReversedRange { start, end })
                }
                (Some(start), Some(end)) => Ok(Matcher::Span { start, end }),
                _ => Err(InvalidOverride::HalfOpenRange),
            },
            (None, None, false) => Err(InvalidOverride::MissingMatcher),
            _ => Err(InvalidOverride::ConflictingMatchers),
        }
    }
}

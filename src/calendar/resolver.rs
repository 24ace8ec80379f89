use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::time::{Date, WeekDay};

/// A public holiday calendar for the relevant jurisdiction: the name it
/// gives a date is what override records can be keyed on.
pub trait HolidayCalendar {
    fn name_for_date(&self, date: Date) -> Option<String>;
}

/// Lookup operations an override store has to answer. Absence is an
/// expected outcome for all three, never an error.
pub trait OverrideStore {
    fn find_by_name(&self, name: &str) -> Result<Option<StoredOverride>, StoreError>;
    fn find_by_date(&self, date: Date) -> Result<Option<StoredOverride>, StoreError>;
    fn find_by_range(&self, date: Date) -> Result<Option<StoredOverride>, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("holiday override store is unreachable")]
    Io(#[from] io::Error),
    #[error("holiday override store is corrupt: {0}")]
    Malformed(String),
}

/// What an override record matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// The holiday name reported by the [`HolidayCalendar`].
    Name(String),
    /// A literal date.
    Day(Date),
    /// Every date in `start..=end`.
    Span { start: Date, end: Date },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOverride {
    matcher: Matcher,
    artwork: Option<PathBuf>,
    closed: bool,
}

impl StoredOverride {
    #[must_use]
    pub fn new(matcher: Matcher, artwork: Option<PathBuf>, closed: bool) -> Self {
        Self {
            matcher,
            artwork,
            closed,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn artwork(&self) -> Option<&Path> {
        self.artwork.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// The lookup strategies, in the order they are tried. The first strategy
/// that produces an override wins; later ones are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    ByName,
    ByDate,
    ByRange,
}

impl Lookup {
    pub const PRECEDENCE: [Self; 3] = [Self::ByName, Self::ByDate, Self::ByRange];

    pub fn find(
        &self,
        store: &dyn OverrideStore,
        date: Date,
        holiday_name: Option<&str>,
    ) -> Result<Option<StoredOverride>, StoreError> {
        match self {
            Self::ByName => match holiday_name {
                Some(name) => store.find_by_name(name),
                None => Ok(None),
            },
            Self::ByDate => store.find_by_date(date),
            Self::ByRange => store.find_by_range(date),
        }
    }
}

/// What one calendar day needs on top of its base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayResolution {
    artwork: Option<PathBuf>,
    closed: bool,
}

impl DayResolution {
    pub fn artwork(&self) -> Option<&Path> {
        self.artwork.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl From<StoredOverride> for DayResolution {
    fn from(stored: StoredOverride) -> Self {
        Self {
            artwork: stored.artwork,
            closed: stored.closed,
        }
    }
}

pub struct Resolver<'a> {
    store: &'a dyn OverrideStore,
    calendar: &'a dyn HolidayCalendar,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn OverrideStore, calendar: &'a dyn HolidayCalendar) -> Self {
        Self { store, calendar }
    }

    /// Decides artwork and closure for one day.
    ///
    /// A stored override always wins over the implicit weekly closure:
    /// a Sunday override with `closed = false` leaves the room open.
    pub fn resolve(&self, date: Date) -> Result<DayResolution, StoreError> {
        let holiday_name = self.calendar.name_for_date(date);

        for lookup in Lookup::PRECEDENCE {
            if let Some(stored) = lookup.find(self.store, date, holiday_name.as_deref())? {
                return Ok(stored.into());
            }
        }

        Ok(DayResolution {
            artwork: None,
            closed: date.week_day().is_eq(&WeekDay::Sunday),
        })
    }
}

/// An in-memory override store, usually built from
/// [`toml_input::OverrideFile`](crate::input::toml_input::OverrideFile).
#[derive(Debug, Clone, Default)]
pub struct StaticOverrideStore {
    overrides: Vec<StoredOverride>,
}

impl StaticOverrideStore {
    #[must_use]
    pub fn new(overrides: Vec<StoredOverride>) -> Self {
        Self { overrides }
    }

    fn first_match(
        &self,
        predicate: impl Fn(&Matcher) -> bool,
    ) -> Result<Option<StoredOverride>, StoreError> {
        Ok(self
            .overrides
            .iter()
            .find(|stored| predicate(stored.matcher()))
            .cloned())
    }
}

impl OverrideStore for StaticOverrideStore {
    fn find_by_name(&self, name: &str) -> Result<Option<StoredOverride>, StoreError> {
        self.first_match(|matcher| matches!(matcher, Matcher::Name(n) if n == name))
    }

    fn find_by_date(&self, date: Date) -> Result<Option<StoredOverride>, StoreError> {
        self.first_match(|matcher| matches!(matcher, Matcher::Day(d) if *d == date))
    }

    fn find_by_range(&self, date: Date) -> Result<Option<StoredOverride>, StoreError> {
        self.first_match(
            |matcher| matches!(matcher, Matcher::Span { start, end } if *start <= date && date <= *end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    struct FixedCalendar(&'static str, Date);

    impl HolidayCalendar for FixedCalendar {
        fn name_for_date(&self, date: Date) -> Option<String> {
            (date == self.1).then(|| self.0.to_string())
        }
    }

    struct NoHolidays;

    impl HolidayCalendar for NoHolidays {
        fn name_for_date(&self, _: Date) -> Option<String> {
            None
        }
    }

    fn named(name: &str, artwork: Option<&str>, closed: bool) -> StoredOverride {
        StoredOverride::new(
            Matcher::Name(name.to_string()),
            artwork.map(PathBuf::from),
            closed,
        )
    }

    fn dated(date: Date, artwork: Option<&str>, closed: bool) -> StoredOverride {
        StoredOverride::new(Matcher::Day(date), artwork.map(PathBuf::from), closed)
    }

    fn span(start: Date, end: Date, closed: bool) -> StoredOverride {
        StoredOverride::new(Matcher::Span { start, end }, None, closed)
    }

    #[test]
    fn test_name_match_wins_over_date_match() {
        // 2025-07-04 is a Friday
        let date = date!(2025:07:04);
        let store = StaticOverrideStore::new(vec![
            dated(date, Some("art/Fireworks.png"), false),
            named("Independence Day", Some("art/IndependenceDay.png"), true),
        ]);
        let calendar = FixedCalendar("Independence Day", date);

        let resolution = Resolver::new(&store, &calendar).resolve(date).unwrap();

        assert_eq!(
            resolution.artwork(),
            Some(Path::new("art/IndependenceDay.png"))
        );
        assert!(resolution.is_closed());
    }

    #[test]
    fn test_date_match_wins_over_range_match() {
        let date = date!(2025:04:19);
        let store = StaticOverrideStore::new(vec![
            span(date!(2025:04:18), date!(2025:04:20), true),
            dated(date, Some("art/EasterSunday.png"), false),
        ]);

        let resolution = Resolver::new(&store, &NoHolidays).resolve(date).unwrap();

        assert_eq!(resolution.artwork(), Some(Path::new("art/EasterSunday.png")));
        assert!(!resolution.is_closed());
    }

    #[test]
    fn test_range_match_is_inclusive_on_both_ends() {
        let store = StaticOverrideStore::new(vec![span(
            date!(2025:12:26),
            date!(2025:12:27),
            true,
        )]);
        let resolver = Resolver::new(&store, &NoHolidays);

        assert!(resolver.resolve(date!(2025:12:26)).unwrap().is_closed());
        assert!(resolver.resolve(date!(2025:12:27)).unwrap().is_closed());
        // the day before the range starts is a Thursday and stays open
        assert!(!resolver.resolve(date!(2025:12:25)).unwrap().is_closed());
    }

    #[test]
    fn test_no_match_leaves_the_day_open() {
        let resolver_store = StaticOverrideStore::default();
        let resolution = Resolver::new(&resolver_store, &NoHolidays)
            .resolve(date!(2025:12:02))
            .unwrap();

        assert_eq!(resolution.artwork(), None);
        assert!(!resolution.is_closed());
    }

    #[test]
    fn test_sundays_are_implicitly_closed() {
        // 2025-12-07 is a Sunday
        let store = StaticOverrideStore::default();
        let resolution = Resolver::new(&store, &NoHolidays)
            .resolve(date!(2025:12:07))
            .unwrap();

        assert!(resolution.is_closed());
        assert_eq!(resolution.artwork(), None);
    }

    #[test]
    fn test_explicit_override_opens_a_sunday() {
        // an override that marks a Sunday as open beats the weekly rule
        let date = date!(2025:12:07);
        let store = StaticOverrideStore::new(vec![dated(date, None, false)]);

        let resolution = Resolver::new(&store, &NoHolidays).resolve(date).unwrap();

        assert!(!resolution.is_closed());
    }

    #[test]
    fn test_closed_range_on_a_sunday_agrees_with_the_weekly_rule() {
        let date = date!(2025:12:07);
        let store =
            StaticOverrideStore::new(vec![span(date!(2025:12:06), date!(2025:12:08), true)]);

        let resolution = Resolver::new(&store, &NoHolidays).resolve(date).unwrap();

        assert!(resolution.is_closed());
    }

    #[test]
    fn test_unknown_holiday_name_is_not_an_error() {
        let date = date!(2025:11:27);
        let store = StaticOverrideStore::new(vec![named("Thanksgiving", None, true)]);
        let calendar = FixedCalendar("Day After Thanksgiving", date.add_days(1));

        // the calendar names the 28th, not the 27th; nothing matches
        let resolution = Resolver::new(&store, &calendar)
            .resolve(date.add_days(1))
            .unwrap();

        assert!(!resolution.is_closed());
        assert_eq!(resolution.artwork(), None);
    }
}

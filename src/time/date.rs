use core::fmt;
use core::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;

use crate::time::{Month, WeekDay, Year};
use crate::utils::StrExt;

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        const _YEAR: $crate::time::Year = $crate::time::Year::new($year);
        static_assertions::const_assert!($month >= 1 && $month <= 12);

        const _MONTH: $crate::time::Month = $crate::time::Month::new($month);

        // validate the day
        static_assertions::const_assert!($day != 0);
        static_assertions::const_assert!($day <= _YEAR.number_of_days_in_month(_MONTH));

        unsafe { $crate::time::Date::new_unchecked(_YEAR, _MONTH, $day) }
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Date {
    year: Year,
    month: Month,
    day: usize,
}

impl Date {
    /// The number of days between 0000-01-01 and 1970-01-01.
    const UNIX_EPOCH_DAYS: usize = 719_528;

    /// 0000-01-01 is a Saturday in the proleptic Gregorian calendar.
    const BASE_WEEK_DAY_INDEX: usize = 5;

    pub fn new(year: impl Into<Year>, month: Month, day: usize) -> Result<Self, InvalidDate> {
        let year = year.into();
        if year.number_of_days_in_month(month) < day || day == 0 {
            return Err(InvalidDate::InvalidDay { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    #[doc(hidden)]
    #[must_use]
    pub const unsafe fn new_unchecked(year: Year, month: Month, day: usize) -> Self {
        Self { year, month, day }
    }

    /// Returns the date of the first day in the month.
    #[must_use]
    pub const fn first_day(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: 1,
        }
    }

    /// Returns the date of the last day in the month.
    #[must_use]
    pub const fn last_day(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: year.number_of_days_in_month(month),
        }
    }

    /// The current date, taken from the system clock (UTC).
    ///
    /// A clock before the unix epoch counts as the epoch.
    #[must_use]
    pub fn today() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);

        Self::from_days_since_base_date(Self::UNIX_EPOCH_DAYS + (seconds / 86_400) as usize)
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> usize {
        self.day
    }

    pub const fn week_day(&self) -> WeekDay {
        WeekDay::days()[(Self::BASE_WEEK_DAY_INDEX + self.days_since_base_date()) % 7]
    }

    /// The number of days in this year before this month starts.
    const fn days_before_month(year: Year, month: Month) -> usize {
        // cumulative days for a common year, January..December
        const CUMULATIVE: [usize; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        let mut days = CUMULATIVE[month.as_usize() - 1];
        if month.as_usize() > 2 && year.is_leap_year() {
            days += 1;
        }

        days
    }

    #[must_use]
    pub(crate) const fn days_since_base_date(&self) -> usize {
        self.year.days_since_base_date()
            + Self::days_before_month(self.year, self.month)
            + (self.day - 1)
    }

    #[must_use]
    pub(crate) const fn from_days_since_base_date(days: usize) -> Self {
        // `days / 366` is a lower bound for the year, at most a handful of
        // years below the real one
        let mut year = Year::new(days / 366);
        while year.next().days_since_base_date() <= days {
            year = year.next();
        }

        let mut ordinal = days - year.days_since_base_date();
        let mut month = Month::January;
        loop {
            let days_in_month = year.number_of_days_in_month(month);
            if ordinal < days_in_month {
                break;
            }

            if month.is_eq(&Month::December) {
                const_panic::concat_panic!(
                    "ordinal ",
                    ordinal,
                    " does not fit into year ",
                    year.as_usize()
                );
            }

            ordinal -= days_in_month;
            month = month.next();
        }

        Self {
            year,
            month,
            day: ordinal + 1,
        }
    }

    #[must_use]
    pub const fn add_days(self, days: usize) -> Self {
        Self::from_days_since_base_date(self.days_since_base_date() + days)
    }

    #[must_use]
    pub const fn sub_days(self, days: usize) -> Self {
        let since_base = self.days_since_base_date();
        if since_base < days {
            const_panic::concat_panic!("can not go ", days, " days before the base date");
        }

        Self::from_days_since_base_date(since_base - days)
    }

    /// Returns the number of days that have passed between `self` and `other`.
    ///
    /// `self + self.days_until(other) == other`
    ///
    /// # Panics
    ///
    /// This function assumes that `self` is not after `other`.
    #[must_use]
    pub const fn days_until(&self, other: Self) -> usize {
        other.days_since_base_date() - self.days_since_base_date()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not a valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year:04}-{month:02}")]
    InvalidDay {
        year: Year,
        month: Month,
        day: usize,
    },
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.as_usize(),
            self.month.as_usize(),
            self.day
        )
    }
}

fn parse_or_err(input: &str) -> Result<usize, InvalidDate> {
    input
        .parse::<usize>()
        .map_err(|_| InvalidDate::ParseDateError {
            input: input.to_string(),
        })
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if let [Some(year), Some(month), Some(day)] = string.split_exact::<3>("-") {
            let year = Year::new(parse_or_err(year)?);
            let month =
                Month::try_from(parse_or_err(month)?).map_err(|_| InvalidDate::ParseDateError {
                    input: string.to_string(),
                })?;
            let day = parse_or_err(day)?;

            Self::new(year, month, day)
        } else {
            Err(InvalidDate::ParseDateError {
                input: string.to_string(),
            })
        }
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Date> for toml::value::Date {
    fn from(date: Date) -> Self {
        toml::value::Date {
            year: date.year().as_usize() as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl TryFrom<toml::value::Date> for Date {
    type Error = InvalidDate;

    fn try_from(date: toml::value::Date) -> Result<Self, Self::Error> {
        Self::new(
            Year::new(date.year as usize),
            Month::try_from(date.month as usize).map_err(|_| InvalidDate::ParseDateError {
                input: date.to_string(),
            })?,
            date.day as usize,
        )
    }
}

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "usize")]
#[serde(into = "usize")]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    pub const fn new(number: usize) -> Self {
        Self::months()[number - 1]
    }

    pub const fn months() -> [Self; 12] {
        [
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    pub const fn as_usize(&self) -> usize {
        *self as usize
    }

    #[must_use]
    pub(crate) const fn is_eq(&self, other: &Self) -> bool {
        self.as_usize() == other.as_usize()
    }

    #[must_use]
    pub const fn next(&self) -> Self {
        Self::months()[self.as_usize() % 12]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// The three letter abbreviation used on the date stamp and in
    /// the per-page file names, for example `"Dec"`.
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
            Self::May => "May",
            Self::June => "Jun",
            Self::July => "Jul",
            Self::August => "Aug",
            Self::September => "Sep",
            Self::October => "Oct",
            Self::November => "Nov",
            Self::December => "Dec",
        }
    }
}

impl From<Month> for usize {
    fn from(month: Month) -> Self {
        month.as_usize()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_usize().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Error)]
#[error("invalid month number")]
pub struct InvalidNumberForMonth;

impl TryFrom<usize> for Month {
    type Error = InvalidNumberForMonth;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::months()
            .into_iter()
            .find(|month| *month as usize == value)
            .ok_or(InvalidNumberForMonth)
    }
}

/// The month token typed by the operator could not be understood.
///
/// This is user input, not an environment problem: the caller is expected
/// to surface the message and ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a month. Expected a name like \"June\" or a number from 1 to 12")]
pub struct InvalidMonth {
    input: String,
}

impl InvalidMonth {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl FromStr for Month {
    type Err = InvalidMonth;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();

        if let Ok(number) = token.parse::<usize>() {
            return Self::try_from(number).map_err(|_| InvalidMonth::new(token));
        }

        Self::months()
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| InvalidMonth::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        for month in Month::months() {
            assert_eq!(month.to_string(), month.as_usize().to_string());
        }
    }

    #[test]
    fn test_next() {
        assert_eq!(Month::December.next(), Month::January);
        assert_eq!(Month::January.next(), Month::February);

        let months = Month::months();
        for i in 0..months.len() {
            assert_eq!(months[i].next(), months[(i + 1) % months.len()]);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("June".parse(), Ok(Month::June));
        assert_eq!("june".parse(), Ok(Month::June));
        assert_eq!("DECEMBER".parse(), Ok(Month::December));
        assert_eq!(" February ".parse(), Ok(Month::February));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!("1".parse(), Ok(Month::January));
        assert_eq!("12".parse(), Ok(Month::December));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for token in ["", "0", "13", "Juneteenth", "Dez", "1.5"] {
            assert_eq!(
                token.parse::<Month>(),
                Err(InvalidMonth::new(token.trim())),
                "token {:?} should not parse",
                token
            );
        }
    }
}

use crate::calendar::HolidayCalendar;
use crate::time::{Date, Month, WeekDay};

/// Public holidays observed in Michigan, which is what the override store
/// keys its named records on.
///
/// Covers the fixed state holidays (including Christmas Eve and New Year's
/// Eve), the floating federal ones, and the usual observation shifts: a
/// fixed holiday on a Saturday is observed the Friday before, one on a
/// Sunday the Monday after, under the name `"… (Observed)"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MichiganHolidays;

const fn fixed_name(month: Month, day: usize) -> Option<&'static str> {
    let fixed_holidays: [(usize, Month, &'static str); 7] = [
        (1, Month::January, "New Year's Day"),
        (19, Month::June, "Juneteenth National Independence Day"),
        (4, Month::July, "Independence Day"),
        (11, Month::November, "Veterans Day"),
        (24, Month::December, "Christmas Eve"),
        (25, Month::December, "Christmas Day"),
        (31, Month::December, "New Year's Eve"),
    ];

    let mut i = 0;
    while i < fixed_holidays.len() {
        let (fixed_day, fixed_month, name) = fixed_holidays[i];

        if day == fixed_day && month.is_eq(&fixed_month) {
            return Some(name);
        }

        i += 1;
    }

    None
}

/// The 1-based occurrence of this date's weekday within its month.
const fn nth_week_day(date: Date) -> usize {
    (date.day() + 6) / 7
}

const fn is_last_week_day_of_month(date: Date) -> bool {
    date.day() + 7 > date.year().number_of_days_in_month(date.month())
}

const fn floating_name(date: Date) -> Option<&'static str> {
    let month = date.month();

    if date.week_day().is_eq(&WeekDay::Monday) {
        if month.is_eq(&Month::January) && nth_week_day(date) == 3 {
            return Some("Martin Luther King Jr. Day");
        }

        if month.is_eq(&Month::February) && nth_week_day(date) == 3 {
            return Some("Washington's Birthday");
        }

        if month.is_eq(&Month::May) && is_last_week_day_of_month(date) {
            return Some("Memorial Day");
        }

        if month.is_eq(&Month::September) && nth_week_day(date) == 1 {
            return Some("Labor Day");
        }
    }

    if date.week_day().is_eq(&WeekDay::Thursday)
        && month.is_eq(&Month::November)
        && nth_week_day(date) == 4
    {
        return Some("Thanksgiving");
    }

    None
}

fn observed_name(date: Date) -> Option<String> {
    let shifted = match date.week_day() {
        // the day after a Friday is a Saturday
        WeekDay::Friday => {
            let saturday = date.add_days(1);
            fixed_name(saturday.month(), saturday.day())
        }
        WeekDay::Monday => {
            let sunday = date.sub_days(1);
            fixed_name(sunday.month(), sunday.day())
        }
        _ => None,
    }?;

    Some(format!("{} (Observed)", shifted))
}

impl HolidayCalendar for MichiganHolidays {
    /// A date that carries a holiday of its own keeps that name; observed
    /// shifts only land on otherwise plain days.
    fn name_for_date(&self, date: Date) -> Option<String> {
        if let Some(name) = floating_name(date) {
            return Some(name.to_string());
        }

        if let Some(name) = fixed_name(date.month(), date.day()) {
            return Some(name.to_string());
        }

        observed_name(date)
    }
}

use crate::time::{Date, DateRange, InvalidMonth, Month, Year};

/// The set of calendar dates one request covers, as a half open range
/// `[first of month, first of next month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintPlan {
    start: Date,
    end: Date,
}

impl PrintPlan {
    /// Parses the operator's month token and resolves the target year.
    ///
    /// An explicit year wins; otherwise the year is inferred from `today`.
    pub fn from_token(
        token: &str,
        explicit_year: Option<Year>,
        today: Date,
    ) -> Result<Self, InvalidMonth> {
        let month = token.parse::<Month>()?;
        let year = explicit_year.unwrap_or_else(|| Self::infer_year(month, today));

        Ok(Self::new(month, year))
    }

    #[must_use]
    pub fn new(month: Month, year: Year) -> Self {
        let start = Date::first_day(year, month);
        let end = match month {
            // December wraps to January 1 of the following year
            Month::December => Date::first_day(year.next(), Month::January),
            _ => Date::first_day(year, month.next()),
        };

        Self { start, end }
    }

    /// Asking for January or February in November or December means the
    /// upcoming year, not the one already past.
    #[must_use]
    pub fn infer_year(month: Month, today: Date) -> Year {
        if today.month() >= Month::November && month <= Month::February {
            today.year().next()
        } else {
            today.year()
        }
    }

    pub fn month(&self) -> Month {
        self.start.month()
    }

    pub fn year(&self) -> Year {
        self.start.year()
    }

    pub fn start(&self) -> Date {
        self.start
    }

    /// The first date after the plan, exclusive.
    pub fn end(&self) -> Date {
        self.end
    }

    pub fn number_of_pages(&self) -> usize {
        self.start.days_until(self.end)
    }

    pub fn dates(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_january_in_late_november_means_next_year() {
        let today = date!(2025:11:20);
        assert_eq!(PrintPlan::infer_year(Month::January, today), Year::new(2026));
        assert_eq!(
            PrintPlan::infer_year(Month::February, today),
            Year::new(2026)
        );
    }

    #[test]
    fn test_january_in_december_means_next_year() {
        let today = date!(2025:12:05);
        assert_eq!(PrintPlan::infer_year(Month::January, today), Year::new(2026));
    }

    #[test]
    fn test_january_in_march_means_current_year() {
        let today = date!(2025:03:10);
        assert_eq!(PrintPlan::infer_year(Month::January, today), Year::new(2025));
    }

    #[test]
    fn test_march_in_november_means_current_year() {
        let today = date!(2025:11:20);
        assert_eq!(PrintPlan::infer_year(Month::March, today), Year::new(2025));
        assert_eq!(
            PrintPlan::infer_year(Month::December, today),
            Year::new(2025)
        );
    }

    #[test]
    fn test_december_wraps_to_january() {
        let plan = PrintPlan::new(Month::December, Year::new(2025));

        assert_eq!(plan.start(), date!(2025:12:01));
        assert_eq!(plan.end(), date!(2026:01:01));
        assert_eq!(plan.number_of_pages(), 31);
    }

    #[test]
    fn test_other_months_end_on_the_first_of_the_next_month() {
        let plan = PrintPlan::new(Month::April, Year::new(2025));

        assert_eq!(plan.start(), date!(2025:04:01));
        assert_eq!(plan.end(), date!(2025:05:01));
        assert_eq!(plan.number_of_pages(), 30);
    }

    #[test]
    fn test_plan_length_matches_the_month() {
        for year in [2024usize, 2025] {
            let year = Year::new(year);
            for month in Month::months() {
                let plan = PrintPlan::new(month, year);
                assert_eq!(
                    plan.number_of_pages(),
                    year.number_of_days_in_month(month),
                    "{}-{:02}",
                    year,
                    month
                );
                assert_eq!(plan.dates().count(), plan.number_of_pages());
            }
        }
    }

    #[test]
    fn test_from_token_rejects_garbage() {
        let result = PrintPlan::from_token("Juneteenth", None, date!(2025:03:10));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_token_with_explicit_year() {
        let plan =
            PrintPlan::from_token("January", Some(Year::new(2024)), date!(2025:12:05)).unwrap();

        assert_eq!(plan.year(), Year::new(2024));
        assert_eq!(plan.number_of_pages(), 31);
    }
}

mod date;
mod date_range;
mod month;
mod week_day;
mod year;

pub use date::{Date, InvalidDate};
pub use date_range::DateRange;
pub use month::{InvalidMonth, InvalidNumberForMonth, Month};
pub use week_day::{InvalidWeekDayNumber, WeekDay};
pub use year::Year;

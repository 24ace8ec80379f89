use std::path::Path;

use image::DynamicImage;

use crate::calendar::{load_image, ErrorKind};
use crate::input::RoomType;
use crate::time::WeekDay;

/// The opening hours printed on a page only come in four flavours:
/// Monday through Thursday share one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySlot {
    Weekday,
    Friday,
    Saturday,
    Sunday,
}

impl DaySlot {
    #[must_use]
    pub const fn of(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Self::Sunday,
            WeekDay::Saturday => Self::Saturday,
            WeekDay::Friday => Self::Friday,
            _ => Self::Weekday,
        }
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Weekday => 0,
            Self::Friday => 1,
            Self::Saturday => 2,
            Self::Sunday => 3,
        }
    }
}

/// One table for both rooms, so the two sets can not drift apart.
const TEMPLATE_FILES: [[&str; 4]; 2] = [
    [
        "SR_0_Asset_WeekdayHours.png",
        "SR_1_Asset_FridayHours.png",
        "SR_2_Asset_SaturdayHours.png",
        "SR_3_Asset_SundayHours.png",
    ],
    [
        "PR_0_Asset_WeekdayHours.png",
        "PR_1_Asset_FridayHours.png",
        "PR_2_Asset_SaturdayHours.png",
        "PR_3_Asset_SundayHours.png",
    ],
];

/// The closure stamp is shared between the room types.
pub const CLOSED_STAMP_FILE: &str = "4_Asset_ClosedToday.png";

#[must_use]
pub const fn template_file(room: RoomType, slot: DaySlot) -> &'static str {
    TEMPLATE_FILES[room.index()][slot.index()]
}

pub fn load_template(
    assets_dir: &Path,
    room: RoomType,
    slot: DaySlot,
) -> Result<DynamicImage, ErrorKind> {
    load_image(&assets_dir.join(template_file(room, slot)))
}

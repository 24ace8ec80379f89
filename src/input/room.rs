use core::fmt;
use core::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// The room a calendar is printed for. Each room type has its own set of
/// base templates, the closure stamp is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Study,
    Program,
}

impl RoomType {
    pub const fn rooms() -> [Self; 2] {
        [Self::Study, Self::Program]
    }

    /// The label used in the final document file name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Program => "Program",
        }
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Study => 0,
            Self::Program => 1,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a room type. Expected \"study\" or \"program\"")]
pub struct InvalidRoomType {
    input: String,
}

impl FromStr for RoomType {
    type Err = InvalidRoomType;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();

        Self::rooms()
            .into_iter()
            .find(|room| room.label().eq_ignore_ascii_case(token))
            .ok_or_else(|| InvalidRoomType {
                input: token.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!("study".parse(), Ok(RoomType::Study));
        assert_eq!("Program".parse(), Ok(RoomType::Program));
        assert!("lobby".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(RoomType::Study.label(), "Study");
        assert_eq!(RoomType::Program.to_string(), "Program");
    }
}

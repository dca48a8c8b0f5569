use crate::error::{FillerError, IllegalReason};
use crate::core::PlayerId;
use std::fmt;
use std::str::FromStr;

/// パレットの色数
pub const COLOR_COUNT: usize = 6;

/// Palette entries in id order. The order is part of the board format.
pub const PALETTE: [(&str, (u8, u8, u8)); COLOR_COUNT] = [
    ("RED", (222, 74, 90)),
    ("GREEN", (172, 210, 103)),
    ("YELLOW", (245, 221, 80)),
    ("BLUE", (88, 163, 234)),
    ("PURPLE", (102, 79, 153)),
    ("GRAY", (71, 71, 71)),
];

/// A palette color id in `[0, COLOR_COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    pub const RED: Color = Color(0);
    pub const GREEN: Color = Color(1);
    pub const YELLOW: Color = Color(2);
    pub const BLUE: Color = Color(3);
    pub const PURPLE: Color = Color(4);
    pub const GRAY: Color = Color(5);

    /// Checked constructor. Out-of-range ids are never representable.
    pub fn new(id: u8) -> Option<Color> {
        if (id as usize) < COLOR_COUNT {
            Some(Color(id))
        } else {
            None
        }
    }

    /// Like `new`, but reports the id as an illegal action for `player`.
    pub fn for_action(id: u8, player: PlayerId) -> Result<Color, FillerError> {
        Color::new(id).ok_or(FillerError::IllegalAction {
            player,
            color: id,
            reason: IllegalReason::OutOfRange,
        })
    }

    pub fn all() -> impl Iterator<Item = Color> {
        (0..COLOR_COUNT as u8).map(Color)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        PALETTE[self.index()].0
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        PALETTE[self.index()].1
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses a palette name, ignoring case.
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        PALETTE
            .iter()
            .position(|(name, _)| *name == upper)
            .map(|i| Color(i as u8))
            .ok_or_else(|| {
                let names: Vec<&str> = PALETTE.iter().map(|(name, _)| *name).collect();
                format!(
                    "Color \"{}\" not found. Possible options: {}",
                    s.trim(),
                    names.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_case_insensitively() {
        assert_eq!("red".parse::<Color>(), Ok(Color::RED));
        assert_eq!(" Purple ".parse::<Color>(), Ok(Color::PURPLE));
        assert_eq!("GRAY".parse::<Color>(), Ok(Color::GRAY));
        assert!("orange".parse::<Color>().is_err());
    }

    #[test]
    fn test_palette_order_is_fixed() {
        let names: Vec<&str> = Color::all().map(Color::name).collect();
        assert_eq!(names, ["RED", "GREEN", "YELLOW", "BLUE", "PURPLE", "GRAY"]);
        assert_eq!(Color::new(6), None);
        assert_eq!(Color::new(5), Some(Color::GRAY));
    }
}

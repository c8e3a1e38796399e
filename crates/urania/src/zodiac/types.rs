use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The twelve tropical signs, in zodiac order starting at 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Index 0-11 (Aries = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn glyph(self) -> &'static str {
        const GLYPHS: [&str; 12] = [
            "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
        ];
        GLYPHS[self.index()]
    }

    /// Longitude where the sign begins (0, 30, ... 330)
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Sign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

/// Returned when a sign name does not match any of the twelve signs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown zodiac sign: {0:?}")]
pub struct UnknownSign(pub String);

/// A longitude expressed as sign, whole degree within the sign and arc minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: Sign,
    /// 0-29
    pub degree: u8,
    /// 0-59
    #[serde(rename = "minutes")]
    pub minute: u8,
}

impl ZodiacPosition {
    /// Ecliptic longitude represented by this position, to the arc minute.
    pub fn longitude(&self) -> f64 {
        self.sign.start_longitude() + self.degree as f64 + self.minute as f64 / 60.0
    }

    /// Whole degrees from 0° Aries (sign * 30 + degree)
    pub fn absolute_degree(&self) -> u16 {
        self.sign.index() as u16 * 30 + self.degree as u16
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}°{:02}′", self.sign, self.degree, self.minute)
    }
}

// Value types exchanged with the road noise service.

pub mod timestamp;
pub mod weather;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use weather::{Condition, Rain, WeatherSnapshot, Wind};

/// One recorded rating. Created by the service, never modified by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseEntry {
    pub id: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub noise_level: NoiseLevel,
    pub weather: WeatherSnapshot,
}

/// Severity tag used when rendering a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityColor {
    Green,
    Blue,
    Orange,
    Red,
}

/// Subjective road noise rating, carried on the wire as the bare integer 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NoiseLevel {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("noise level must be 0-3, got {0}")]
pub struct InvalidNoiseLevel(pub String);

impl NoiseLevel {
    pub const ALL: [NoiseLevel; 4] = [
        NoiseLevel::Zero,
        NoiseLevel::One,
        NoiseLevel::Two,
        NoiseLevel::Three,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            NoiseLevel::Zero => "What noise?",
            NoiseLevel::One => "It's fine",
            NoiseLevel::Two => "Need headphones",
            NoiseLevel::Three => "Just awful",
        }
    }

    pub fn color(self) -> SeverityColor {
        match self {
            NoiseLevel::Zero => SeverityColor::Green,
            NoiseLevel::One => SeverityColor::Blue,
            NoiseLevel::Two => SeverityColor::Orange,
            NoiseLevel::Three => SeverityColor::Red,
        }
    }
}

impl TryFrom<u8> for NoiseLevel {
    type Error = InvalidNoiseLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NoiseLevel::Zero),
            1 => Ok(NoiseLevel::One),
            2 => Ok(NoiseLevel::Two),
            3 => Ok(NoiseLevel::Three),
            other => Err(InvalidNoiseLevel(other.to_string())),
        }
    }
}

impl From<NoiseLevel> for u8 {
    fn from(level: NoiseLevel) -> Self {
        level.value()
    }
}

impl FromStr for NoiseLevel {
    type Err = InvalidNoiseLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(NoiseLevel::Zero),
            "1" => Ok(NoiseLevel::One),
            "2" => Ok(NoiseLevel::Two),
            "3" => Ok(NoiseLevel::Three),
            other => Err(InvalidNoiseLevel(other.to_string())),
        }
    }
}

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

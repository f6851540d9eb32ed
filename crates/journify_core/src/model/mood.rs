//! Mood domain model.
//!
//! # Responsibility
//! - Define the fixed categorical mood set and its weekly score table.
//! - Define the three-slider dimensional mood.
//!
//! # Invariants
//! - Categorical moods persist as their emoji glyph.
//! - Every dimensional mood carries all three dimensions within `1..=5`.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// One member of the fixed categorical mood set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodSymbol {
    Happy,
    Sad,
    Angry,
    Calm,
    Excited,
    Tired,
}

impl MoodSymbol {
    /// All symbols in picker order.
    pub const ALL: [MoodSymbol; 6] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Calm,
        Self::Excited,
        Self::Tired,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Angry => "😡",
            Self::Calm => "😌",
            Self::Excited => "🤩",
            Self::Tired => "🥱",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Calm => "calm",
            Self::Excited => "excited",
            Self::Tired => "tired",
        }
    }

    /// Weekly chart score for this symbol.
    pub fn score(self) -> u8 {
        match self {
            Self::Happy | Self::Excited => 5,
            Self::Calm => 4,
            Self::Sad | Self::Angry => 2,
            Self::Tired => 1,
        }
    }

    /// Resolves a stored emoji or a lowercase name.
    pub fn from_token(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.emoji() == trimmed || symbol.name() == trimmed)
    }
}

impl Display for MoodSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.emoji())
    }
}

impl Serialize for MoodSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.emoji())
    }
}

impl<'de> Deserialize<'de> for MoodSymbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_token(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown mood symbol `{raw}`")))
    }
}

/// Slider mood: three integer dimensions, each within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensionalMood")]
pub struct DimensionalMood {
    tiredness: u8,
    happiness: u8,
    stress: u8,
}

#[derive(Deserialize)]
struct RawDimensionalMood {
    tiredness: i64,
    happiness: i64,
    stress: i64,
}

impl TryFrom<RawDimensionalMood> for DimensionalMood {
    type Error = ValidationError;

    fn try_from(raw: RawDimensionalMood) -> Result<Self, Self::Error> {
        Self::new(raw.tiredness, raw.happiness, raw.stress)
    }
}

impl DimensionalMood {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    /// Builds a slider mood, rejecting any dimension outside `1..=5`.
    pub fn new(tiredness: i64, happiness: i64, stress: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            tiredness: checked_dimension("tiredness", tiredness)?,
            happiness: checked_dimension("happiness", happiness)?,
            stress: checked_dimension("stress", stress)?,
        })
    }

    pub fn tiredness(&self) -> u8 {
        self.tiredness
    }

    pub fn happiness(&self) -> u8 {
        self.happiness
    }

    pub fn stress(&self) -> u8 {
        self.stress
    }

    /// Arithmetic mean of the three dimensions.
    pub fn mean(&self) -> f64 {
        (f64::from(self.tiredness) + f64::from(self.happiness) + f64::from(self.stress)) / 3.0
    }
}

fn checked_dimension(dimension: &'static str, value: i64) -> Result<u8, ValidationError> {
    if !(DimensionalMood::MIN..=DimensionalMood::MAX).contains(&value) {
        return Err(ValidationError::DimensionOutOfRange { dimension, value });
    }
    u8::try_from(value).map_err(|_| ValidationError::DimensionOutOfRange { dimension, value })
}

//! Life-cycle phases over normalized time.

use av_core::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contiguous, non-overlapping sub-intervals of `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Protostar,
    MainSequence,
    RedGiant,
    WhiteDwarf,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Self::Protostar,
        Self::MainSequence,
        Self::RedGiant,
        Self::WhiteDwarf,
    ];

    /// Normalized start time.
    pub fn start(self) -> f64 {
        match self {
            Self::Protostar => 0.0,
            Self::MainSequence => 0.2,
            Self::RedGiant => 0.4,
            Self::WhiteDwarf => 0.7,
        }
    }

    /// Normalized end time (exclusive, except the last phase which ends at 1 inclusive).
    pub fn end(self) -> f64 {
        match self {
            Self::Protostar => 0.2,
            Self::MainSequence => 0.4,
            Self::RedGiant => 0.7,
            Self::WhiteDwarf => 1.0,
        }
    }

    pub fn length(self) -> f64 {
        self.end() - self.start()
    }

    /// Phase containing normalized time `t`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `t` is outside `[0, 1]` or not finite.
    pub fn at(t: f64) -> ModelResult<Self> {
        if !(0.0..=1.0).contains(&t) {
            return Err(ModelError::invalid("normalized time", t));
        }
        let phase = Self::ALL
            .into_iter()
            .find(|p| t < p.end())
            .unwrap_or(Self::WhiteDwarf);
        Ok(phase)
    }

    /// Fraction of this phase elapsed at `t`.
    pub fn local_fraction(self, t: f64) -> f64 {
        (t - self.start()) / self.length()
    }

    /// Index used when phases are serialized as a numeric channel.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Protostar => 0,
            Self::MainSequence => 1,
            Self::RedGiant => 2,
            Self::WhiteDwarf => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Protostar => "Protostar",
            Self::MainSequence => "Main Sequence",
            Self::RedGiant => "Red Giant",
            Self::WhiteDwarf => "White Dwarf",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

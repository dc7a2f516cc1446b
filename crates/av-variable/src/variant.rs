//! Brightness-curve shapes.

use av_core::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of curve shapes.
///
/// `Cepheid` is the default shape: selectors that do not name a known variant
/// resolve to it through [`StarVariant::from_name_or_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StarVariant {
    /// Pure sinusoid between the brightness extremes.
    #[default]
    Cepheid,
    /// Squared sine: never drops below the minimum, rises and falls unevenly.
    RRLyrae,
    /// Cepheid shape damped to 80% amplitude.
    Pulsating,
}

impl StarVariant {
    pub const ALL: [StarVariant; 3] = [Self::Cepheid, Self::RRLyrae, Self::Pulsating];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cepheid => "Cepheid",
            Self::RRLyrae => "RR Lyrae",
            Self::Pulsating => "Pulsating",
        }
    }

    /// Stable machine name used in scenario files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Cepheid => "cepheid",
            Self::RRLyrae => "rr_lyrae",
            Self::Pulsating => "pulsating",
        }
    }

    /// Resolve a selector, using the default shape for anything unrecognised.
    ///
    /// Returns the variant and whether the default was substituted.
    pub fn from_name_or_default(name: &str) -> (Self, bool) {
        match name.parse() {
            Ok(variant) => (variant, false),
            Err(_) => (Self::default(), true),
        }
    }
}

impl FromStr for StarVariant {
    type Err = ModelError;

    /// Strict parse: case, spaces, `-` and `_` are ignored.
    fn from_str(s: &str) -> ModelResult<Self> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "cepheid" => Ok(Self::Cepheid),
            "rrlyrae" => Ok(Self::RRLyrae),
            "pulsating" => Ok(Self::Pulsating),
            _ => Err(ModelError::UnknownVariant {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_labels_and_keys() {
        for variant in StarVariant::ALL {
            assert_eq!(variant.label().parse::<StarVariant>().unwrap(), variant);
            assert_eq!(variant.key().parse::<StarVariant>().unwrap(), variant);
        }
        assert_eq!("RR-Lyrae".parse::<StarVariant>().unwrap(), StarVariant::RRLyrae);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "mira".parse::<StarVariant>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownVariant {
                name: "mira".to_string()
            }
        );
    }

    #[test]
    fn unknown_selector_defaults_to_cepheid() {
        assert_eq!(
            StarVariant::from_name_or_default("mira"),
            (StarVariant::Cepheid, true)
        );
        assert_eq!(
            StarVariant::from_name_or_default("pulsating"),
            (StarVariant::Pulsating, false)
        );
        assert_eq!(StarVariant::default(), StarVariant::Cepheid);
    }
}

//! Edit-distance tolerance for fuzzy term matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AUTO_FUZZINESS_HIGH, DEFAULT_AUTO_FUZZINESS_LOW};

/// Edit-distance tolerance applied per query term.
///
/// `Auto { low, high }` allows 0 edits for terms shorter than `low`, 1 edit
/// for terms shorter than `high`, and 2 edits otherwise. `Edits(n)` is a
/// fixed bound (0..=2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Fuzziness {
    Auto { low: u8, high: u8 },
    Edits(u8),
}

impl Fuzziness {
    /// Maximum edit distance for a query term of `term_len` characters.
    pub fn max_edits(self, term_len: usize) -> usize {
        match self {
            Self::Auto { low, high } => {
                if term_len < low as usize {
                    0
                } else if term_len < high as usize {
                    1
                } else {
                    2
                }
            }
            Self::Edits(n) => n as usize,
        }
    }
}

impl Default for Fuzziness {
    fn default() -> Self {
        Self::Auto {
            low: DEFAULT_AUTO_FUZZINESS_LOW,
            high: DEFAULT_AUTO_FUZZINESS_HIGH,
        }
    }
}

impl fmt::Display for Fuzziness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Auto { low, high }
                if low == DEFAULT_AUTO_FUZZINESS_LOW && high == DEFAULT_AUTO_FUZZINESS_HIGH =>
            {
                f.write_str("AUTO")
            }
            Self::Auto { low, high } => write!(f, "AUTO:{low},{high}"),
            Self::Edits(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Fuzziness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let upper = s.to_ascii_uppercase();
        if upper == "AUTO" {
            return Ok(Self::default());
        }
        if let Some(bounds) = upper.strip_prefix("AUTO:") {
            let (low, high) = bounds
                .split_once(',')
                .ok_or_else(|| format!("expected AUTO:low,high, got {s:?}"))?;
            let low: u8 = low
                .trim()
                .parse()
                .map_err(|_| format!("invalid low bound in {s:?}"))?;
            let high: u8 = high
                .trim()
                .parse()
                .map_err(|_| format!("invalid high bound in {s:?}"))?;
            if low > high {
                return Err(format!("low bound exceeds high bound in {s:?}"));
            }
            return Ok(Self::Auto { low, high });
        }
        match s.parse::<u8>() {
            Ok(n) if n <= 2 => Ok(Self::Edits(n)),
            Ok(n) => Err(format!("edit distance {n} out of range 0..=2")),
            Err(_) => Err(format!("unrecognised fuzziness {s:?}")),
        }
    }
}

impl TryFrom<String> for Fuzziness {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fuzziness> for String {
    fn from(value: Fuzziness) -> Self {
        value.to_string()
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised when building a [`Rational`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RationalError {
    #[error("Rational with a zero denominator")]
    ZeroDenominator,
    #[error("Not a rational: {0:?}")]
    Malformed(String),
    #[error("Rational {0}/{1} cannot carry its sign on the numerator")]
    Overflow(i64, i64),
}

/// A numerator/denominator pair as stored by EXIF and XMP rational tags.
///
/// The pair is kept as written (`10/4` is not reduced to `5/2`); only the
/// sign is normalised onto the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, RationalError> {
        if denominator == 0 {
            return Err(RationalError::ZeroDenominator);
        }
        if denominator < 0 {
            let overflow = || RationalError::Overflow(numerator, denominator);
            return Ok(Self {
                numerator: numerator.checked_neg().ok_or_else(overflow)?,
                denominator: denominator.checked_neg().ok_or_else(overflow)?,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Rational {
    type Err = RationalError;

    /// Parse `"N/D"`. Surrounding whitespace is tolerated here; the strict
    /// wire-form rules live in [`crate::convert::numeric::parse_rational`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RationalError::Malformed(s.to_string());
        let (num, den) = s.trim().split_once('/').ok_or_else(malformed)?;
        let num: i64 = num.trim().parse().map_err(|_| malformed())?;
        let den: i64 = den.trim().parse().map_err(|_| malformed())?;
        Rational::new(num, den)
    }
}

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    // D,M.mmmmDir (lossy decimal minutes) or the canonical D,M,SDir.
    static ref GPS_RE: Regex = Regex::new(
        r"^(?P<degrees>\d+),(?P<minutes>\d+)(?:\.(?P<fraction>\d+)|,(?P<seconds>\d+))(?P<direction>[NSEW])$"
    )
    .unwrap();
}

/// Errors raised when building a [`GpsCoordinate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpsError {
    #[error("GPS {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("Invalid GPS direction: {0:?}")]
    Direction(char),
    #[error("Invalid GPS coordinate: {0:?}")]
    Malformed(String),
}

/// Cardinal direction of a GPS coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn from_char(c: char) -> Result<Self, GpsError> {
        match c {
            'N' => Ok(Self::North),
            'S' => Ok(Self::South),
            'E' => Ok(Self::East),
            'W' => Ok(Self::West),
            other => Err(GpsError::Direction(other)),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    /// Latitudes stop at 90 degrees.
    fn max_degrees(&self) -> i64 {
        match self {
            Self::North | Self::South => 90,
            Self::East | Self::West => 179,
        }
    }
}

/// A GPS coordinate as degrees, minutes, seconds and a direction.
///
/// Immutable once built; all fields are validated by [`GpsCoordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpsCoordinate {
    degrees: u32,
    minutes: u32,
    seconds: u32,
    direction: Direction,
}

impl GpsCoordinate {
    pub fn new(
        degrees: i64,
        minutes: i64,
        seconds: i64,
        direction: char,
    ) -> Result<Self, GpsError> {
        let direction = Direction::from_char(direction)?;
        if !(0..=direction.max_degrees()).contains(&degrees) {
            return Err(GpsError::OutOfRange {
                field: "degrees",
                value: degrees,
            });
        }
        if !(0..=59).contains(&minutes) {
            return Err(GpsError::OutOfRange {
                field: "minutes",
                value: minutes,
            });
        }
        if !(0..=59).contains(&seconds) {
            return Err(GpsError::OutOfRange {
                field: "seconds",
                value: seconds,
            });
        }
        Ok(Self {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
            direction,
        })
    }

    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Parse `"D,M.mmmmDir"` (or the canonical `"D,M,SDir"`).
    ///
    /// Seconds are derived from the fraction of minutes by truncation, so
    /// `"54,59.3800N"` gives 22 seconds (0.38 × 60 = 22.8), not 23. This is
    /// kept as is; decimal minutes do not round-trip exactly.
    pub fn from_string(s: &str) -> Result<Self, GpsError> {
        let malformed = || GpsError::Malformed(s.to_string());
        let caps = GPS_RE.captures(s).ok_or_else(malformed)?;
        let degrees: i64 = caps["degrees"].parse().map_err(|_| malformed())?;
        let minutes: i64 = caps["minutes"].parse().map_err(|_| malformed())?;
        let seconds = match (caps.name("fraction"), caps.name("seconds")) {
            (Some(fraction), _) => seconds_from_fraction(fraction.as_str()).ok_or_else(malformed)?,
            (None, Some(seconds)) => seconds.as_str().parse().map_err(|_| malformed())?,
            (None, None) => return Err(malformed()),
        };
        let direction = caps["direction"].chars().next().ok_or_else(malformed)?;
        Self::new(degrees, minutes, seconds, direction)
    }

    /// Render as `"D,M.mmmmmmDir"`, minutes with six decimals.
    pub fn to_decimal_minutes_string(&self) -> String {
        // seconds / 60 scaled to 1e6, truncated
        let fraction = self.seconds as u64 * 1_000_000 / 60;
        format!(
            "{},{}.{:06}{}",
            self.degrees,
            self.minutes,
            fraction,
            self.direction.as_char()
        )
    }
}

/// `floor(0.<digits> * 60)`, computed exactly.
fn seconds_from_fraction(digits: &str) -> Option<i64> {
    // Digits past the 18th cannot change the floor of the result.
    let digits = &digits[..digits.len().min(18)];
    let numerator: u128 = digits.parse().ok()?;
    let scale = 10u128.checked_pow(digits.len() as u32)?;
    i64::try_from(numerator * 60 / scale).ok()
}

impl fmt::Display for GpsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.direction.as_char()
        )
    }
}

impl FromStr for GpsCoordinate {
    type Err = GpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ─────────────────────────────────────────────────

    #[test]
    fn constructor_valid() {
        for (d, m, s, dir, as_str) in [
            (62, 58, 2, 'W', "62,58,2W"),
            (92, 58, 2, 'W', "92,58,2W"),
            (54, 59, 23, 'N', "54,59,23N"),
        ] {
            let gps = GpsCoordinate::new(d, m, s, dir).unwrap();
            assert_eq!(gps.degrees() as i64, d);
            assert_eq!(gps.minutes() as i64, m);
            assert_eq!(gps.seconds() as i64, s);
            assert_eq!(gps.direction().as_char(), dir);
            assert_eq!(gps.to_string(), as_str);
        }
    }

    #[test]
    fn constructor_invalid() {
        for (d, m, s, dir) in [
            (-23, 58, 2, 'W'),
            (91, 58, 2, 'S'),
            (180, 0, 0, 'E'),
            (62, -23, 2, 'W'),
            (62, 61, 2, 'W'),
            (62, 58, -23, 'W'),
            (62, 58, 61, 'W'),
        ] {
            assert!(
                matches!(
                    GpsCoordinate::new(d, m, s, dir),
                    Err(GpsError::OutOfRange { .. })
                ),
                "expected out of range for {d},{m},{s}{dir}"
            );
        }
        assert_eq!(
            GpsCoordinate::new(62, 58, 2, 'A'),
            Err(GpsError::Direction('A'))
        );
    }

    // ── parsing ──────────────────────────────────────────────────────

    #[test]
    fn from_string_decimal_minutes() {
        assert_eq!(
            GpsCoordinate::from_string("1,54.850000W").unwrap(),
            GpsCoordinate::new(1, 54, 51, 'W').unwrap()
        );
        // 0.38 * 60 = 22.8, truncated
        assert_eq!(
            GpsCoordinate::from_string("54,59.3800N").unwrap(),
            GpsCoordinate::new(54, 59, 22, 'N').unwrap()
        );
    }

    #[test]
    fn from_string_canonical() {
        let gps = GpsCoordinate::new(54, 59, 23, 'N').unwrap();
        assert_eq!(gps.to_string().parse::<GpsCoordinate>().unwrap(), gps);
    }

    #[test]
    fn from_string_invalid() {
        for bad in [
            "51N",
            "48 24 3 S",
            "48°24'3\"S",
            "invalid",
            "54,59.38X",
            "54,75.5N",
            "95,10.5N",
        ] {
            assert!(
                GpsCoordinate::from_string(bad).is_err(),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn decimal_minutes_truncate_seconds() {
        let gps = GpsCoordinate::new(54, 59, 23, 'N').unwrap();
        let text = gps.to_decimal_minutes_string();
        assert_eq!(text, "54,59.383333N");
        let back = GpsCoordinate::from_string(&text).unwrap();
        assert_eq!(back.seconds(), 22);
        assert_ne!(back, gps);
    }
}

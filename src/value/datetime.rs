use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Timelike, Utc};

/// Build a fixed offset from a sign and an (hours, minutes) pair.
///
/// Returns `None` when the offset is a day or more away from UTC.
pub fn fixed_offset(negative: bool, hours: u32, minutes: u32) -> Option<FixedOffset> {
    let seconds = i64::from(hours)
        .checked_mul(60)?
        .checked_add(i64::from(minutes))?
        .checked_mul(60)?;
    let seconds = i32::try_from(seconds).ok()?;
    FixedOffset::east_opt(if negative { -seconds } else { seconds })
}

/// `+00:00`.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// A calendar datetime, naive or tagged with a fixed offset.
///
/// The wall-clock fields are stored as given; the offset only annotates
/// them. Equality is structural: a naive value never equals an offset one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    datetime: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl DateTimeValue {
    pub fn naive(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            offset: None,
        }
    }

    pub fn with_offset(datetime: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            datetime,
            offset: Some(offset),
        }
    }

    pub fn utc(datetime: NaiveDateTime) -> Self {
        Self::with_offset(datetime, utc())
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.datetime.time()
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn microsecond(&self) -> u32 {
        self.datetime.nanosecond() / 1_000
    }

    /// The time-of-day part, keeping the offset.
    pub fn to_time(&self) -> TimeValue {
        TimeValue {
            time: self.datetime.time(),
            offset: self.offset,
        }
    }
}

/// A time of day, naive or tagged with a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeValue {
    time: NaiveTime,
    offset: Option<FixedOffset>,
}

impl TimeValue {
    pub fn naive(time: NaiveTime) -> Self {
        Self { time, offset: None }
    }

    pub fn with_offset(time: NaiveTime, offset: FixedOffset) -> Self {
        Self {
            time,
            offset: Some(offset),
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_offset_signs() {
        assert_eq!(fixed_offset(false, 5, 30).unwrap().local_minus_utc(), 19800);
        assert_eq!(fixed_offset(true, 4, 0).unwrap().local_minus_utc(), -14400);
        assert!(fixed_offset(false, 24, 0).is_none());
        assert!(fixed_offset(false, 40_000_000, 0).is_none());
        assert!(fixed_offset(false, u32::MAX, 0).is_none());
        assert!(fixed_offset(true, 0, u32::MAX).is_none());
    }

    #[test]
    fn naive_differs_from_utc() {
        let dt = NaiveDate::from_ymd_opt(2009, 3, 1)
            .unwrap()
            .and_hms_opt(12, 46, 51)
            .unwrap();
        assert_ne!(DateTimeValue::naive(dt), DateTimeValue::utc(dt));
        assert_eq!(DateTimeValue::utc(dt).offset(), Some(utc()));
    }

    #[test]
    fn to_time_keeps_offset() {
        let dt = NaiveDate::from_ymd_opt(2007, 2, 7)
            .unwrap()
            .and_hms_micro_opt(10, 52, 4, 478)
            .unwrap();
        let offset = fixed_offset(false, 5, 30).unwrap();
        let value = DateTimeValue::with_offset(dt, offset);
        assert_eq!(value.microsecond(), 478);
        assert_eq!(value.to_time().offset(), Some(offset));
    }
}

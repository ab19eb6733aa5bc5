//! Availability policy: whether live delivery is permitted at a given instant.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

use crate::error::{RelayError, Result};

/// Source of the current instant. Production uses [`SystemClock`]; tests pin time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Working window: eligible weekdays and a daily `[start, end)` range in a fixed-offset timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityPolicy {
    offset: FixedOffset,
    start: NaiveTime,
    end: NaiveTime,
    /// 0 = Monday .. 6 = Sunday.
    weekdays: BTreeSet<u8>,
}

impl AvailabilityPolicy {
    /// Requires `start < end` and weekdays within `0..=6`.
    pub fn new(
        offset: FixedOffset,
        start: NaiveTime,
        end: NaiveTime,
        weekdays: impl IntoIterator<Item = u8>,
    ) -> Result<Self> {
        if start >= end {
            return Err(RelayError::ConfigurationMalformed(format!(
                "working start {} must be before end {}",
                start, end
            )));
        }
        let weekdays: BTreeSet<u8> = weekdays.into_iter().collect();
        if let Some(bad) = weekdays.iter().find(|d| **d > 6) {
            return Err(RelayError::ConfigurationMalformed(format!(
                "weekday {} is out of range 0..=6",
                bad
            )));
        }
        Ok(Self {
            offset,
            start,
            end,
            weekdays,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn weekdays(&self) -> impl Iterator<Item = u8> + '_ {
        self.weekdays.iter().copied()
    }

    /// Expresses an instant in the working timezone.
    pub fn localize(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// True iff `now` falls on an eligible weekday and within `[start, end)` local time.
    pub fn is_live_window(&self, now: DateTime<Utc>) -> bool {
        let local = self.localize(now);
        let weekday = local.weekday().num_days_from_monday() as u8;
        let time = local.time();
        self.weekdays.contains(&weekday) && self.start <= time && time < self.end
    }

    /// Next instant strictly after `now` at which the local clock reads `start`. Every calendar
    /// day qualifies, regardless of the weekday set.
    pub fn next_start_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.localize(now).naive_local();
        let mut candidate = local.date().and_time(self.start);
        if candidate <= local {
            candidate += Duration::days(1);
        }
        let as_utc = candidate - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&as_utc)
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<String> = self.weekdays.iter().map(u8::to_string).collect();
        write!(
            f,
            "{}-{} {} days [{}]",
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.offset,
            days.join(",")
        )
    }
}

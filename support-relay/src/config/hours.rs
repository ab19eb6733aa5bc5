//! Working hours: timezone, daily window, eligible weekdays and the drain tick's grace period.

use std::env;
use std::time::Duration;

use chrono::{FixedOffset, NaiveTime};
use relay_core::{AvailabilityPolicy, RelayError, Result};

const DEFAULT_UTC_OFFSET: &str = "+02:00";
const DEFAULT_START: &str = "08:00";
const DEFAULT_END: &str = "19:00";
const DEFAULT_DAYS: &str = "0,1,2,3,4,5,6";
const DEFAULT_GRACE_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WorkingHours {
    pub policy: AvailabilityPolicy,
    /// How late the daily drain may fire before that day's tick is skipped.
    pub drain_grace: Duration,
}

impl WorkingHours {
    /// WORKING_UTC_OFFSET, WORK_START, WORK_END, WORK_DAYS, DRAIN_GRACE_SECS.
    pub fn from_env() -> Result<Self> {
        let offset = parse_offset(&var_or("WORKING_UTC_OFFSET", DEFAULT_UTC_OFFSET))?;
        let start = parse_time("WORK_START", &var_or("WORK_START", DEFAULT_START))?;
        let end = parse_time("WORK_END", &var_or("WORK_END", DEFAULT_END))?;
        let weekdays = parse_weekdays(&var_or("WORK_DAYS", DEFAULT_DAYS))?;
        let grace_secs = match env::var("DRAIN_GRACE_SECS") {
            Ok(s) => s.trim().parse::<u64>().map_err(|_| {
                RelayError::ConfigurationMalformed(format!("DRAIN_GRACE_SECS is not a number: {}", s))
            })?,
            Err(_) => DEFAULT_GRACE_SECS,
        };

        Ok(Self {
            policy: AvailabilityPolicy::new(offset, start, end, weekdays)?,
            drain_grace: Duration::from_secs(grace_secs),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// `+02:00`, `-0530`, ...
pub fn parse_offset(s: &str) -> Result<FixedOffset> {
    s.trim().parse::<FixedOffset>().map_err(|e| {
        RelayError::ConfigurationMalformed(format!("WORKING_UTC_OFFSET {:?}: {}", s, e))
    })
}

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(name: &str, s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| RelayError::ConfigurationMalformed(format!("{} {:?}: {}", name, s, e)))
}

/// Comma-separated weekday numbers, 0 = Monday .. 6 = Sunday.
pub fn parse_weekdays(s: &str) -> Result<Vec<u8>> {
    s.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<u8>().map_err(|_| {
                RelayError::ConfigurationMalformed(format!("WORK_DAYS entry is not a weekday number: {}", d))
            })
        })
        .collect()
}

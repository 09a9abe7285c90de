//! Trigger cadence for the release newsletter.
//!
//! Two deployment styles are supported: a fixed weekly slot
//! (`weekly:mon@09:00`) and short fixed-interval polling (`every:10s`).
//! All times are UTC.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Datelike, Days, NaiveTime, Utc, Weekday};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Unknown trigger '{0}', expected 'every:<n>[s|m|h]' or 'weekly:<day>@HH:MM'")]
    UnknownFormat(String),
    #[error("Invalid interval '{0}'")]
    InvalidInterval(String),
    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),
    #[error("Invalid time of day '{0}'")]
    InvalidTime(String),
}

/// When the notifier fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fixed interval between the end of one wait and the next.
    Every(Duration),
    /// Once a week at the given UTC time.
    Weekly { weekday: Weekday, time: NaiveTime },
}

impl Trigger {
    /// Returns the first firing instant strictly after `now`.
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Trigger::Every(interval) => chrono::Duration::from_std(interval)
                .ok()
                .and_then(|interval| now.checked_add_signed(interval))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            Trigger::Weekly { weekday, time } => {
                let today = now.date_naive();
                let days_ahead = (7 + weekday.num_days_from_monday()
                    - today.weekday().num_days_from_monday())
                    % 7;
                let candidate = today
                    .checked_add_days(Days::new(u64::from(days_ahead)))
                    .unwrap_or(today)
                    .and_time(time)
                    .and_utc();
                if candidate > now {
                    candidate
                } else {
                    candidate + chrono::Duration::days(7)
                }
            }
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Every(interval) => write!(f, "every:{}s", interval.as_secs()),
            Trigger::Weekly { weekday, time } => {
                write!(
                    f,
                    "weekly:{}@{}",
                    weekday.to_string().to_lowercase(),
                    time.format("%H:%M")
                )
            }
        }
    }
}

impl FromStr for Trigger {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(interval) = s.strip_prefix("every:") {
            return parse_interval(interval).map(Trigger::Every);
        }
        if let Some(slot) = s.strip_prefix("weekly:") {
            let (day, time) = slot
                .split_once('@')
                .ok_or_else(|| ScheduleError::UnknownFormat(s.to_string()))?;
            let weekday = day
                .parse::<Weekday>()
                .map_err(|_| ScheduleError::InvalidWeekday(day.to_string()))?;
            let time = NaiveTime::parse_from_str(time, "%H:%M")
                .map_err(|_| ScheduleError::InvalidTime(time.to_string()))?;
            return Ok(Trigger::Weekly { weekday, time });
        }
        Err(ScheduleError::UnknownFormat(s.to_string()))
    }
}

fn parse_interval(raw: &str) -> Result<Duration, ScheduleError> {
    let invalid = || ScheduleError::InvalidInterval(raw.to_string());
    let (number, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((index, _)) => raw.split_at(index),
        None => (raw, "s"),
    };
    let n: u64 = number.parse().map_err(|_| invalid())?;
    let seconds = match unit {
        "s" => n,
        "m" => n.checked_mul(60).ok_or_else(invalid)?,
        "h" => n.checked_mul(3600).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    if seconds == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn monday_nine() -> Trigger {
        Trigger::Weekly {
            weekday: Weekday::Mon,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_every() {
        assert_eq!(
            "every:10s".parse::<Trigger>().unwrap(),
            Trigger::Every(Duration::from_secs(10))
        );
        assert_eq!(
            "every:2m".parse::<Trigger>().unwrap(),
            Trigger::Every(Duration::from_secs(120))
        );
        assert_eq!(
            "every:30".parse::<Trigger>().unwrap(),
            Trigger::Every(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_parse_every_rejects_zero_and_garbage() {
        assert!("every:0s".parse::<Trigger>().is_err());
        assert!("every:ten".parse::<Trigger>().is_err());
        assert!("every:5d".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_parse_weekly() {
        assert_eq!("weekly:mon@09:00".parse::<Trigger>().unwrap(), monday_nine());
        assert_eq!(
            "weekly:friday@18:30".parse::<Trigger>().unwrap(),
            Trigger::Weekly {
                weekday: Weekday::Fri,
                time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_parse_weekly_errors() {
        assert_eq!(
            "weekly:funday@09:00".parse::<Trigger>(),
            Err(ScheduleError::InvalidWeekday("funday".to_string()))
        );
        assert_eq!(
            "weekly:mon@25:00".parse::<Trigger>(),
            Err(ScheduleError::InvalidTime("25:00".to_string()))
        );
        assert!(matches!(
            "cron:*/2".parse::<Trigger>(),
            Err(ScheduleError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["every:10s", "weekly:mon@09:00"] {
            let trigger: Trigger = raw.parse().unwrap();
            assert_eq!(trigger.to_string(), raw);
        }
    }

    #[test]
    fn test_every_next_fire() {
        let trigger = Trigger::Every(Duration::from_secs(10));
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(trigger.next_fire_after(now), now + chrono::Duration::seconds(10));
    }

    #[test]
    fn test_weekly_later_same_day() {
        // 2025-03-10 is a Monday
        let now = at(2025, 3, 10, 8, 0);
        assert_eq!(monday_nine().next_fire_after(now), at(2025, 3, 10, 9, 0));
    }

    #[test]
    fn test_weekly_exactly_at_slot_moves_to_next_week() {
        let now = at(2025, 3, 10, 9, 0);
        assert_eq!(monday_nine().next_fire_after(now), at(2025, 3, 17, 9, 0));
    }

    #[test]
    fn test_weekly_from_midweek() {
        // Wednesday
        let now = at(2025, 3, 12, 15, 30);
        assert_eq!(monday_nine().next_fire_after(now), at(2025, 3, 17, 9, 0));
    }

    #[test]
    fn test_weekly_from_sunday_night() {
        let now = at(2025, 3, 16, 23, 59);
        assert_eq!(monday_nine().next_fire_after(now), at(2025, 3, 17, 9, 0));
    }
}

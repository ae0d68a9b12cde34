//! Local calendar view of absolute instants.
//!
//! Every instant the engine touches, including "now", goes through the same
//! `LocalClock`, so day keys and decimal hours always agree on one zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TimelineError};

pub const DEFAULT_TIMEZONE: &str = "Europe/Kyiv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    tz: Tz,
}

impl Default for LocalClock {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::Kyiv,
        }
    }
}

impl LocalClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Resolve an IANA zone name such as `Europe/Kyiv`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| TimelineError::UnknownTimezone(name.to_string()))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// `hour + minute/60 + second/3600` in the local zone. Sub-second
    /// precision is ignored.
    pub fn decimal_hour(&self, instant: DateTime<Utc>) -> f64 {
        let t = self.local(instant);
        t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
    }

    /// Local calendar date, the grouping key for days.
    pub fn day_key(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// Monday 00:00 local of the week containing `now`, as an absolute
    /// instant. Falls back to the earliest valid local time if midnight is
    /// skipped by a DST transition.
    pub fn current_week_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.day_key(now);
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        self.start_of_day(monday)
    }

    /// First instant of `date` in the local zone.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.tz.from_local_datetime(&midnight) {
            chrono::LocalResult::Single(t) => t.with_timezone(&Utc),
            chrono::LocalResult::Ambiguous(early, _) => early.with_timezone(&Utc),
            chrono::LocalResult::None => {
                // Gap at midnight: step forward until the wall clock exists again.
                let mut wall = midnight;
                loop {
                    wall += Duration::minutes(15);
                    if let Some(t) = self.tz.from_local_datetime(&wall).earliest() {
                        return t.with_timezone(&Utc);
                    }
                }
            }
        }
    }
}

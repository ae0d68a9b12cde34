//! Week-level totals derived from the seven `Day` records.

use serde::{Deserialize, Serialize};

use super::{Day, IntervalKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Sum over days that carry real data (`!is_future_or_unknown`).
    pub total_hours_on: f64,
    pub total_hours_off: f64,
    pub total_on_text: String,
    pub total_off_text: String,
    /// Share of on/off in their combined total, 0..=100. Both 0 when there
    /// is no data.
    pub percent_on: f64,
    pub percent_off: f64,
    /// Number of `Off` intervals across the whole week.
    pub outage_count: usize,
    pub date_from: String,
    pub date_to: String,
}

impl WeekSummary {
    pub fn from_days(days: &[Day]) -> Self {
        let (total_on, total_off) = days
            .iter()
            .filter(|d| !d.is_future_or_unknown)
            .fold((0.0f64, 0.0f64), |(on, off), d| {
                (on + d.hours_on, off + d.hours_off)
            });
        let total = total_on + total_off;
        let (percent_on, percent_off) = if total > 0.0 {
            (total_on / total * 100.0, total_off / total * 100.0)
        } else {
            (0.0, 0.0)
        };

        let outage_count = days
            .iter()
            .flat_map(|d| d.intervals.iter())
            .filter(|i| i.kind == IntervalKind::Off)
            .count();

        let date_of = |d: Option<&Day>| {
            d.map(|d| d.date.format("%d.%m").to_string())
                .unwrap_or_default()
        };

        Self {
            total_hours_on: total_on,
            total_hours_off: total_off,
            total_on_text: format_hours(total_on),
            total_off_text: format_hours(total_off),
            percent_on,
            percent_off,
            outage_count,
            date_from: date_of(days.first()),
            date_to: date_of(days.last()),
        }
    }
}

/// `"7год 30хв"`. Minutes are rounded ties to even and a full 60 rolls
/// into the hour.
pub fn format_hours(hours: f64) -> String {
    let mut h = hours.trunc() as i64;
    let mut m = ((hours - h as f64) * 60.0).round_ties_even() as i64;
    if m == 60 {
        h += 1;
        m = 0;
    }
    format!("{h}год {m}хв")
}

//! Per-day state machine: sorted events plus the carried-in state become a
//! contiguous list of typed intervals.

use super::{CarryState, DayEvent, Interval, IntervalKind, HOURS_PER_DAY};

/// Intervals for one day and the state to carry into the next.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySegments {
    pub intervals: Vec<Interval>,
    pub carry: CarryState,
}

struct Fold {
    intervals: Vec<Interval>,
    cursor: f64,
    state: CarryState,
}

/// Build one day's intervals.
///
/// `cutoff` is the current local hour and is only given for today. Events at
/// or after the known end (cutoff, or 24h) stop processing: a state change
/// that has not happened yet must not leak into the known part of the day.
/// A trailing `Future` interval covers `[cutoff, 24)`.
pub fn build_day_segments(
    events: &[DayEvent],
    carry: CarryState,
    cutoff: Option<f64>,
) -> DaySegments {
    let known_end = cutoff.unwrap_or(HOURS_PER_DAY);

    let init = Fold {
        intervals: Vec::with_capacity(events.len() + 2),
        cursor: 0.0,
        state: carry,
    };

    let mut acc = events
        .iter()
        .take_while(|ev| ev.hour < known_end)
        .fold(init, |mut acc, ev| {
            if ev.hour > acc.cursor {
                acc.intervals
                    .push(Interval::new(acc.cursor, ev.hour, acc.state.interval_kind()));
            }
            acc.state = CarryState::from(ev.is_on);
            acc.cursor = ev.hour;
            acc
        });

    if acc.cursor < known_end {
        acc.intervals
            .push(Interval::new(acc.cursor, known_end, acc.state.interval_kind()));
    }

    if let Some(cut) = cutoff {
        if cut < HOURS_PER_DAY {
            acc.intervals
                .push(Interval::new(cut, HOURS_PER_DAY, IntervalKind::Future));
        }
    }

    debug_assert!(is_contiguous_day(&acc.intervals), "{:?}", acc.intervals);

    DaySegments {
        intervals: acc.intervals,
        carry: acc.state,
    }
}

/// Intervals start at 0, end at 24, touch each other and are non-empty.
pub fn is_contiguous_day(intervals: &[Interval]) -> bool {
    let Some(first) = intervals.first() else {
        return false;
    };
    let Some(last) = intervals.last() else {
        return false;
    };
    first.start == 0.0
        && last.end == HOURS_PER_DAY
        && intervals.iter().all(|i| i.start < i.end)
        && intervals.windows(2).all(|w| w[0].end == w[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(id: i64, hour: f64, is_on: bool) -> DayEvent {
        DayEvent {
            id,
            hour,
            is_on,
            instant: Utc.timestamp_opt(id * 60, 0).unwrap(),
        }
    }

    fn kinds(s: &DaySegments) -> Vec<IntervalKind> {
        s.intervals.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn quiet_past_day_is_one_interval_of_carried_state() {
        let s = build_day_segments(&[], CarryState::On, None);
        assert_eq!(s.intervals, vec![Interval::new(0.0, 24.0, IntervalKind::On)]);
        assert_eq!(s.carry, CarryState::On);
    }

    #[test]
    fn new_subject_stays_unknown_until_first_event() {
        let s = build_day_segments(&[], CarryState::Unresolved, None);
        assert_eq!(kinds(&s), vec![IntervalKind::Unknown]);
        assert_eq!(s.carry, CarryState::Unresolved);

        let s = build_day_segments(&[at(1, 9.5, false)], CarryState::Unresolved, None);
        assert_eq!(
            s.intervals,
            vec![
                Interval::new(0.0, 9.5, IntervalKind::Unknown),
                Interval::new(9.5, 24.0, IntervalKind::Off),
            ]
        );
        assert_eq!(s.carry, CarryState::Off);
    }

    #[test]
    fn event_at_midnight_has_no_zero_length_lead() {
        let s = build_day_segments(&[at(1, 0.0, false)], CarryState::On, None);
        assert_eq!(s.intervals, vec![Interval::new(0.0, 24.0, IntervalKind::Off)]);
    }

    #[test]
    fn cutoff_truncates_and_appends_future() {
        let s = build_day_segments(&[at(1, 8.0, false)], CarryState::On, Some(10.5));
        assert_eq!(
            s.intervals,
            vec![
                Interval::new(0.0, 8.0, IntervalKind::On),
                Interval::new(8.0, 10.5, IntervalKind::Off),
                Interval::new(10.5, 24.0, IntervalKind::Future),
            ]
        );
    }

    #[test]
    fn events_after_cutoff_do_not_change_state() {
        let evs = [at(1, 8.0, false), at(2, 12.0, true)];
        let s = build_day_segments(&evs, CarryState::On, Some(10.0));
        assert_eq!(
            kinds(&s),
            vec![IntervalKind::On, IntervalKind::Off, IntervalKind::Future]
        );
        assert_eq!(s.carry, CarryState::Off);
    }

    #[test]
    fn cutoff_at_midnight_is_all_future() {
        let s = build_day_segments(&[at(1, 0.0, true)], CarryState::Off, Some(0.0));
        assert_eq!(s.intervals, vec![Interval::new(0.0, 24.0, IntervalKind::Future)]);
        assert_eq!(s.carry, CarryState::Off);
    }

    #[test]
    fn repeated_same_state_events_split_but_keep_kind() {
        let evs = [at(1, 6.0, true), at(2, 6.0, false), at(3, 18.0, false)];
        let s = build_day_segments(&evs, CarryState::On, None);
        assert_eq!(
            s.intervals,
            vec![
                Interval::new(0.0, 6.0, IntervalKind::On),
                Interval::new(6.0, 18.0, IntervalKind::Off),
                Interval::new(18.0, 24.0, IntervalKind::Off),
            ]
        );
        assert!(is_contiguous_day(&s.intervals));
    }
}

//! State in force immediately before the window opens.

use chrono::{DateTime, Utc};

use super::CarryState;
use crate::event::{chronological, Event};

/// Latest event strictly before `window_start` decides the initial state.
/// With no such event the subject is new and the state stays unresolved.
///
/// Ties on the instant go to the event sorted last by the engine order
/// (`max_by` keeps the last of equal elements, matching a stable sort).
pub fn resolve_initial_state(events: &[Event], window_start: DateTime<Utc>) -> CarryState {
    events
        .iter()
        .filter(|e| e.instant < window_start)
        .max_by(|a, b| chronological(a, b))
        .map(|e| CarryState::from(e.is_on))
        .unwrap_or_default()
}

//! Trailing time window over newest-first history.

use chrono::{DateTime, TimeDelta, Utc};
use climateguard_core::OffsetEvent;

/// Events strictly newer than `now - window`, in stored order. A window
/// reaching past the earliest representable instant admits every event.
pub fn within<'a, I>(events: I, now: DateTime<Utc>, window: TimeDelta) -> impl Iterator<Item = &'a OffsetEvent>
where
    I: IntoIterator<Item = &'a OffsetEvent>,
{
    let start = now.checked_sub_signed(window);
    events
        .into_iter()
        .filter(move |e| start.map_or(true, |s| e.created_at > s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use climateguard_core::OffsetKind;

    #[test]
    fn boundary_is_exclusive() {
        let now = Utc::now();
        let window = TimeDelta::minutes(5);
        let at_edge = OffsetEvent::new(OffsetKind::Manual, 10.0, "x", None, now - window, false);
        let inside = OffsetEvent::new(
            OffsetKind::Manual,
            10.0,
            "x",
            None,
            now - window + TimeDelta::milliseconds(1),
            false,
        );
        let events = [inside.clone(), at_edge];
        let hits: Vec<_> = within(&events, now, window).collect();
        assert_eq!(hits, vec![&inside]);
    }

    #[test]
    fn unbounded_window_admits_everything() {
        let now = Utc::now();
        let old = OffsetEvent::new(OffsetKind::Auto, 10.0, "x", None, now - TimeDelta::days(3650), false);
        let events = [old];
        assert_eq!(within(&events, now, TimeDelta::MAX).count(), 1);
    }
}

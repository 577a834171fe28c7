//! Age-based pruning of the history log. Stats are never touched here.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use climateguard_core::OffsetEvent;

/// Drop events created at or before `now - retention`. Returns how many.
/// A cutoff before the earliest representable instant prunes nothing.
pub fn prune(history: &mut VecDeque<OffsetEvent>, now: DateTime<Utc>, retention: TimeDelta) -> usize {
    let Some(cutoff) = now.checked_sub_signed(retention) else {
        return 0;
    };
    let before = history.len();
    history.retain(|e| e.created_at > cutoff);
    before - history.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use climateguard_core::OffsetKind;

    #[test]
    fn removes_at_and_before_cutoff() {
        let now = Utc::now();
        let week = TimeDelta::days(7);
        let mut history: VecDeque<_> = [now, now - week, now - week - TimeDelta::hours(1)]
            .into_iter()
            .map(|at| OffsetEvent::new(OffsetKind::Auto, 10.0, "x", None, at, false))
            .collect();
        assert_eq!(prune(&mut history, now, week), 2);
        assert_eq!(history.len(), 1);
        assert_eq!(prune(&mut history, now, week), 0);
    }

    #[test]
    fn unbounded_retention_keeps_everything() {
        let now = Utc::now();
        let mut history: VecDeque<_> =
            [OffsetEvent::new(OffsetKind::Auto, 10.0, "x", None, now - TimeDelta::days(3650), false)].into();
        assert_eq!(prune(&mut history, now, TimeDelta::MAX), 0);
        assert_eq!(history.len(), 1);
    }
}

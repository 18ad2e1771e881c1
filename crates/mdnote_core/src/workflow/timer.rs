//! Deferred actions driven by the shell's clock.
//!
//! The workflow never sleeps. It schedules an action with a deadline and the
//! shell calls back once that deadline has passed.

use super::notice::NoticeKind;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Hide a notice of the given kind.
    DismissNotice(NoticeKind),
    /// Hand the pending note to the store once `Submitting` was rendered.
    InsertPending,
    /// Leave `Done` after the outcome notice has been shown.
    FinishSubmission,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<(Instant, TimerAction)>,
}

impl Timers {
    /// Schedules `action` at `now + after`, replacing an earlier schedule of
    /// the same action.
    pub fn schedule(&mut self, now: Instant, after: Duration, action: TimerAction) {
        self.pending.retain(|(_, existing)| *existing != action);
        self.pending.push((now + after, action));
    }

    pub fn cancel(&mut self, action: TimerAction) {
        self.pending.retain(|(_, existing)| *existing != action);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Removes and returns actions due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerAction> {
        let mut due: Vec<(Instant, TimerAction)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, action)| action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

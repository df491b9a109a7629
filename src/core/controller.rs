// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::{clock::Clock, state::IncidentState};

pub const RESET_PROMPT: &str = "Are you sure you want to reset the incident timer?";

/// Synchronous yes/no gate in front of a reset.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// An already-answered gate (e.g. the caller confirmed before the request arrived).
impl ConfirmGate for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Declined,
    Reset { at: DateTime<Utc> },
}

/// The only mutator of the reference instant and history.
pub fn request_reset(
    state: &mut IncidentState,
    gate: &mut dyn ConfirmGate,
    clock: &dyn Clock,
) -> ResetOutcome {
    if !gate.confirm(RESET_PROMPT) {
        return ResetOutcome::Declined;
    }

    let at = clock.now();
    state.record_incident(at);
    ResetOutcome::Reset { at }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::TimeZone;

    struct Scripted {
        answer: bool,
        prompts: Vec<String>,
    }

    impl ConfirmGate for Scripted {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            self.answer
        }
    }

    fn t(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, day, 13, 37, 0).unwrap()
    }

    #[test]
    fn declined_changes_nothing() {
        let mut state = IncidentState::new(t(1));
        let before_ref = state.reference();
        let before_len = state.history().len();

        let mut gate = Scripted { answer: false, prompts: vec![] };
        let out = request_reset(&mut state, &mut gate, &FixedClock(t(9)));

        assert_eq!(out, ResetOutcome::Declined);
        assert_eq!(state.reference(), before_ref);
        assert_eq!(state.history().len(), before_len);
        assert_eq!(gate.prompts, vec![RESET_PROMPT.to_string()]);
    }

    #[test]
    fn confirmed_prepends_exactly_one() {
        let mut state = IncidentState::new(t(1));

        let out = request_reset(&mut state, &mut true, &FixedClock(t(4)));
        assert_eq!(out, ResetOutcome::Reset { at: t(4) });
        assert_eq!(state.reference(), t(4));
        assert_eq!(state.history(), &[t(4), t(1)]);

        request_reset(&mut state, &mut true, &FixedClock(t(6)));
        assert_eq!(state.history().len(), 3);
        assert_eq!(state.history()[0], t(6));
    }

    #[test]
    fn pre_answered_false_declines() {
        let mut state = IncidentState::new(t(1));
        let out = request_reset(&mut state, &mut false, &FixedClock(t(2)));
        assert_eq!(out, ResetOutcome::Declined);
        assert_eq!(state.history(), &[t(1)]);
    }
}

// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::{
    duration::{self, FormattedBreakdown},
    state::IncidentState,
    tier::{self, Tier},
};

/// RFC 1123 form used for history entries, e.g. `Mon, 01 Sep 2025 13:37:00 GMT`.
pub const HISTORY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Everything a presenter consumes for one frame.
///
/// Rebuilt from scratch every tick; nothing is carried between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub text: FormattedBreakdown,
    pub elapsed_ms: u64,
    pub tier: Tier,
    pub reference: DateTime<Utc>,
    pub history: Vec<String>,
}

impl View {
    pub fn build(state: &IncidentState, now: DateTime<Utc>) -> Self {
        let breakdown = duration::compute_breakdown(state.reference(), now);

        Self {
            text: duration::format(&breakdown),
            elapsed_ms: breakdown.total_ms(),
            tier: tier::classify_days(breakdown.days),
            reference: state.reference(),
            history: state.history().iter().map(|t| format_history_entry(*t)).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "days": self.text.days,
            "hours": self.text.hours,
            "minutes": self.text.minutes,
            "seconds": self.text.seconds,
            "milliseconds": self.text.milliseconds,
            "elapsed_ms": self.elapsed_ms,
            "tier": self.tier.label().to_lowercase(),
            "color": self.tier.color(),
            "reference": self.reference.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "history": self.history,
        })
    }

    /// Multi-line text for `doomsday info`.
    pub fn pretty_text(&self) -> String {
        format!(
            "Since:   {}\nElapsed: {}\nTier:    {} ({})",
            format_history_entry(self.reference),
            self.text.clock(),
            self.tier.label(),
            self.tier.color(),
        )
    }
}

pub fn format_history_entry(t: DateTime<Utc>) -> String {
    t.format(HISTORY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state() -> IncidentState {
        IncidentState::new(Utc.with_ymd_and_hms(2025, 9, 1, 13, 37, 0).unwrap())
    }

    #[test]
    fn view_reflects_state() {
        let now = DateTime::parse_from_rfc3339("2025-09-03T14:37:00.500Z")
            .unwrap()
            .with_timezone(&Utc);
        let v = View::build(&state(), now);

        assert_eq!(v.text.days, "2");
        assert_eq!(v.text.hours, "01");
        assert_eq!(v.text.minutes, "00");
        assert_eq!(v.text.seconds, "00");
        assert_eq!(v.text.milliseconds, "500");
        assert_eq!(v.tier, Tier::Risky);
        assert_eq!(v.history, vec!["Mon, 01 Sep 2025 13:37:00 GMT".to_string()]);
    }

    #[test]
    fn elapsed_matches_breakdown() {
        let now = DateTime::parse_from_rfc3339("2025-09-04T15:39:01.250Z")
            .unwrap()
            .with_timezone(&Utc);
        let v = View::build(&state(), now);
        let b = duration::compute_breakdown(state().reference(), now);

        assert_eq!(v.elapsed_ms, b.total_ms());
        assert_eq!(v.elapsed_ms, 3 * 86_400_000 + 2 * 3_600_000 + 2 * 60_000 + 1_250);
        assert_eq!(v.text.clock(), "3d 02:02:01.250");
    }

    #[test]
    fn json_shape() {
        let now = Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap();
        let j = View::build(&state(), now).to_json();

        assert_eq!(j["tier"], "legendary");
        assert_eq!(j["color"], "purple");
        assert_eq!(j["days"], "43");
        assert_eq!(j["reference"], "2025-09-01T13:37:00.000Z");
        assert_eq!(j["history"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn pretty_text_mentions_tier() {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 14, 0, 0).unwrap();
        let text = View::build(&state(), now).pretty_text();
        assert!(text.contains("Danger (red)"));
        assert!(text.contains("0d 00:23:00.000"));
    }
}

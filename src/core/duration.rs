// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Elapsed time split into calendar-free fields.
///
/// Every field except `days` is bounded by the next unit up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl Breakdown {
    /// Successive floor division of `ms`, each step working on the previous remainder.
    pub fn from_millis(ms: u64) -> Self {
        let days = ms / MS_PER_DAY;
        let rem = ms % MS_PER_DAY;

        let hours = rem / MS_PER_HOUR;
        let rem = rem % MS_PER_HOUR;

        let minutes = rem / MS_PER_MINUTE;
        let rem = rem % MS_PER_MINUTE;

        let seconds = rem / MS_PER_SECOND;
        let milliseconds = rem % MS_PER_SECOND;

        Self {
            days,
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            milliseconds: milliseconds as u16,
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.days * MS_PER_DAY
            + self.hours as u64 * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MINUTE
            + self.seconds as u64 * MS_PER_SECOND
            + self.milliseconds as u64
    }
}

/// Whole milliseconds from `reference` to `current`, clamped at zero.
pub fn elapsed_ms(reference: DateTime<Utc>, current: DateTime<Utc>) -> u64 {
    let diff = current.signed_duration_since(reference).num_milliseconds();
    diff.max(0) as u64
}

pub fn compute_breakdown(reference: DateTime<Utc>, current: DateTime<Utc>) -> Breakdown {
    Breakdown::from_millis(elapsed_ms(reference, current))
}

/// Fixed-width textual form of a [`Breakdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBreakdown {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub milliseconds: String,
}

impl FormattedBreakdown {
    /// `"<d>d HH:MM:SS.mmm"`
    pub fn clock(&self) -> String {
        format!(
            "{}d {}:{}:{}.{}",
            self.days, self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

pub fn format(b: &Breakdown) -> FormattedBreakdown {
    FormattedBreakdown {
        days: b.days.to_string(),
        hours: format!("{:02}", b.hours),
        minutes: format!("{:02}", b.minutes),
        seconds: format!("{:02}", b.seconds),
        milliseconds: format!("{:03}", b.milliseconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn breakdown_of_known_pair() {
        let b = compute_breakdown(at("2025-09-01T13:37:00Z"), at("2025-09-03T14:37:00.500Z"));
        assert_eq!(
            b,
            Breakdown { days: 2, hours: 1, minutes: 0, seconds: 0, milliseconds: 500 }
        );
    }

    #[test]
    fn future_reference_clamps_to_zero() {
        let b = compute_breakdown(at("2030-01-01T00:00:00Z"), at("2025-01-01T00:00:00Z"));
        assert_eq!(b, Breakdown::default());
        assert_eq!(b.total_ms(), 0);
    }

    #[test]
    fn equal_instants_are_zero() {
        let t = at("2025-09-01T13:37:00Z");
        assert_eq!(compute_breakdown(t, t), Breakdown::default());
    }

    #[test]
    fn sub_millisecond_remainder_is_floored() {
        let reference = Utc.timestamp_opt(0, 0).unwrap();
        let current = Utc.timestamp_opt(1, 999_999).unwrap();
        let b = compute_breakdown(reference, current);
        assert_eq!(b.seconds, 1);
        assert_eq!(b.milliseconds, 0);
    }

    #[test]
    fn fields_stay_in_bounds_and_reconstruct() {
        let reference = at("2025-09-01T13:37:00Z");
        let mut ms: u64 = 0;
        // A spread of offsets, including unit boundaries and large values.
        for step in [1, 999, 1_000, 59_999, 3_599_999, 86_399_999, 86_400_000, 7_777_777_777] {
            ms = ms.wrapping_add(step) % 400_000_000_000;
            let current = reference + chrono::Duration::milliseconds(ms as i64);
            let b = compute_breakdown(reference, current);

            assert!(b.hours < 24);
            assert!(b.minutes < 60);
            assert!(b.seconds < 60);
            assert!(b.milliseconds < 1000);
            assert_eq!(b.total_ms(), ms);
        }
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(Breakdown::from_millis(MS_PER_DAY - 1).days, 0);
        assert_eq!(Breakdown::from_millis(MS_PER_DAY).days, 1);
        assert_eq!(Breakdown::from_millis(MS_PER_HOUR).hours, 1);
        assert_eq!(Breakdown::from_millis(MS_PER_MINUTE - 1).seconds, 59);
    }

    #[test]
    fn format_pads_fields() {
        let b = Breakdown { days: 5, hours: 3, minutes: 7, seconds: 0, milliseconds: 45 };
        let f = format(&b);
        assert_eq!(f.days, "5");
        assert_eq!(f.hours, "03");
        assert_eq!(f.minutes, "07");
        assert_eq!(f.seconds, "00");
        assert_eq!(f.milliseconds, "045");
        assert_eq!(f.clock(), "5d 03:07:00.045");
    }

    #[test]
    fn format_does_not_pad_days() {
        let b = Breakdown { days: 1234, ..Breakdown::default() };
        assert_eq!(format(&b).days, "1234");
    }
}

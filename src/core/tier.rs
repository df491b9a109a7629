// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Severity tier derived from elapsed days. Ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Danger,
    Risky,
    Improving,
    Stable,
    Good,
    Legendary,
}

/// Lower bound (in days) of every tier after `Danger`, ascending.
const THRESHOLDS: [(f64, Tier); 5] = [
    (1.0, Tier::Risky),
    (3.0, Tier::Improving),
    (7.0, Tier::Stable),
    (14.0, Tier::Good),
    (30.0, Tier::Legendary),
];

/// Map a (possibly fractional) day count onto its tier.
///
/// Half-open intervals `[0,1) [1,3) [3,7) [7,14) [14,30) [30,inf)`.
/// Negative and NaN inputs fall into `Danger`.
pub fn classify(days: f64) -> Tier {
    if days.is_nan() {
        return Tier::Danger;
    }

    let mut tier = Tier::Danger;
    for (min, t) in THRESHOLDS {
        if days < min {
            return tier;
        }
        tier = t;
    }
    tier
}

pub fn classify_days(days: u64) -> Tier {
    classify(days as f64)
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Danger,
        Tier::Risky,
        Tier::Improving,
        Tier::Stable,
        Tier::Good,
        Tier::Legendary,
    ];

    /// Abstract color token.
    pub fn color(self) -> &'static str {
        match self {
            Tier::Danger => "red",
            Tier::Risky => "orange",
            Tier::Improving => "yellow",
            Tier::Stable => "green",
            Tier::Good => "blue",
            Tier::Legendary => "purple",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Danger => "Danger",
            Tier::Risky => "Risky",
            Tier::Improving => "Improving",
            Tier::Stable => "Stable",
            Tier::Good => "Good",
            Tier::Legendary => "Legendary",
        }
    }

    /// Day range shown in the legend.
    pub fn range(self) -> &'static str {
        match self {
            Tier::Danger => "0–1d",
            Tier::Risky => "1–3d",
            Tier::Improving => "3–7d",
            Tier::Stable => "7–14d",
            Tier::Good => "14–30d",
            Tier::Legendary => "30d+",
        }
    }

    /// ANSI foreground escape (256-color for orange/purple).
    pub fn ansi(self) -> &'static str {
        match self {
            Tier::Danger => "\x1b[31m",
            Tier::Risky => "\x1b[38;5;208m",
            Tier::Improving => "\x1b[33m",
            Tier::Stable => "\x1b[32m",
            Tier::Good => "\x1b[34m",
            Tier::Legendary => "\x1b[38;5;135m",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

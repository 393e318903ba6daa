use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Locale;

/// Longest daily trend series the dashboard renders.
pub const MAX_TREND_DAYS: u32 = 30;

/// Symbolic reporting period selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRangeToken {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "12m")]
    Last12Months,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl DateRangeToken {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Last7Days,
            Self::Last30Days,
            Self::Last90Days,
            Self::Last12Months,
            Self::AllTime,
        ]
    }

    /// Unrecognized tokens resolve to [`DateRangeToken::AllTime`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "7d" => Self::Last7Days,
            "30d" => Self::Last30Days,
            "90d" => Self::Last90Days,
            "12m" => Self::Last12Months,
            _ => Self::AllTime,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::Last12Months => "12m",
            Self::AllTime => "all",
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Last7Days, Locale::En) => "Last 7 days",
            (Self::Last30Days, Locale::En) => "Last 30 days",
            (Self::Last90Days, Locale::En) => "Last 90 days",
            (Self::Last12Months, Locale::En) => "Last 12 months",
            (Self::AllTime, Locale::En) => "All time",
            (Self::Last7Days, Locale::Ar) => "آخر 7 أيام",
            (Self::Last30Days, Locale::Ar) => "آخر 30 يومًا",
            (Self::Last90Days, Locale::Ar) => "آخر 90 يومًا",
            (Self::Last12Months, Locale::Ar) => "آخر 12 شهرًا",
            (Self::AllTime, Locale::Ar) => "كل الوقت",
        }
    }

    const fn window_days(self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::Last12Months | Self::AllTime => None,
        }
    }

    /// Resolves the token against `now` into absolute window boundaries.
    pub fn resolve(self, now: DateTime<Utc>, locale: Locale) -> DateRangeBounds {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let label = self.label(locale);

        let (start, previous_start) = match self {
            Self::AllTime => (epoch, epoch),
            Self::Last12Months => {
                let start = now.checked_sub_months(Months::new(12)).unwrap_or(epoch);
                let previous_start = start.checked_sub_months(Months::new(12)).unwrap_or(epoch);
                (start, previous_start)
            }
            _ => {
                let days = Duration::days(self.window_days().unwrap_or_default());
                let start = now.checked_sub_signed(days).unwrap_or(epoch);
                let previous_start = start.checked_sub_signed(days).unwrap_or(epoch);
                (start, previous_start)
            }
        };

        let previous_end = match self {
            Self::AllTime => epoch,
            _ => start,
        };

        let trend_days = self
            .window_days()
            .map(|days| (days as u32).min(MAX_TREND_DAYS))
            .unwrap_or(MAX_TREND_DAYS);

        DateRangeBounds {
            token: self,
            start,
            end: now,
            previous_start,
            previous_end,
            trend_days,
            label,
        }
    }
}

/// Absolute boundaries for the current and comparison windows.
///
/// The current window is closed, `[start, end]`. The comparison window is half-open,
/// `[previous_start, previous_end)`, which makes it empty for [`DateRangeToken::AllTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeBounds {
    pub token: DateRangeToken,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
    pub previous_end: DateTime<Utc>,
    pub trend_days: u32,
    pub label: &'static str,
}

impl DateRangeBounds {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    pub fn previous_contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.previous_start && at < self.previous_end
    }

    pub fn has_previous_period(&self) -> bool {
        self.previous_start < self.previous_end
    }
}

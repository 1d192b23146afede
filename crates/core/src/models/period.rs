use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Relative time window applied to spending dates.
///
/// "No filter" is expressed as `Option::<FilterPeriod>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterPeriod {
    /// Only spendings dated today
    Today,
    /// Spendings from the last 7 days, boundary day included
    Week,
    /// Spendings from the last 30 days, boundary day included
    Month,
}

impl FilterPeriod {
    /// Number of days the window reaches back from today.
    pub fn days_back(&self) -> i64 {
        match self {
            FilterPeriod::Today => 0,
            FilterPeriod::Week => 7,
            FilterPeriod::Month => 30,
        }
    }

    /// Earliest spending date that still falls inside the window.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days_back())
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.cutoff(today)
    }
}

impl std::fmt::Display for FilterPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterPeriod::Today => write!(f, "TODAY"),
            FilterPeriod::Week => write!(f, "WEEK"),
            FilterPeriod::Month => write!(f, "MONTH"),
        }
    }
}

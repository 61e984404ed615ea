use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveTime, Utc};

use super::RuleError;

/// Named shorthand for the expiry window used when listing todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// No window at all: every todo, finished or not.
    All,
    Today,
    Tomorrow,
    Week,
}

/// Inclusive expiry bounds for the period filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::All => "",
            Period::Today => "today",
            Period::Tomorrow => "tomorrow",
            Period::Week => "week",
        }
    }

    /// Window starting at `now` and ending at UTC midnight of a later day.
    ///
    /// `Tomorrow` runs from now through the end of tomorrow, so it also
    /// covers the rest of today. `Week` ends after the coming Sunday; on a
    /// Sunday it reaches the Sunday after.
    pub fn range_at(self, now: DateTime<Utc>) -> Option<ExpiryRange> {
        let days_ahead = match self {
            Period::All => return None,
            Period::Today => 1,
            Period::Tomorrow => 2,
            Period::Week => 8 - u64::from(now.weekday().num_days_from_sunday()),
        };

        let end = (now.date_naive() + Days::new(days_ahead))
            .and_time(NaiveTime::MIN)
            .and_utc();

        Some(ExpiryRange {
            start: now.fixed_offset(),
            end: end.fixed_offset(),
        })
    }
}

impl FromStr for Period {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Ok(Period::All),
            "today" => Ok(Period::Today),
            "tomorrow" => Ok(Period::Tomorrow),
            "week" => Ok(Period::Week),
            other => Err(RuleError::InvalidPeriod {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

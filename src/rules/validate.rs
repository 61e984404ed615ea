use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use super::{ExpiryRange, Period, RuleError};
use crate::{
    clock::Clock,
    db::{NewTodo, Todo},
};

/// Format accepted for expiry dates in requests.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// Decides which edits to a todo are legal. Performs no I/O; the only input
/// besides the arguments is the injected clock.
#[derive(Clone)]
pub struct TodoRules {
    clock: Arc<dyn Clock>,
}

impl TodoRules {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Parses a `YYYY-MM-DD` date as UTC midnight and requires it to be
    /// strictly after now.
    pub fn parse_expiry(&self, raw: &str) -> Result<DateTime<FixedOffset>, RuleError> {
        let invalid = || RuleError::InvalidFormat {
            value: raw.to_string(),
        };
        // chrono alone accepts unpadded fields, signs and leading spaces.
        if !has_date_shape(raw) {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(raw, EXPIRY_FORMAT).map_err(|_| invalid())?;
        let expiry = date.and_time(NaiveTime::MIN).and_utc();
        if expiry <= self.clock.now() {
            return Err(RuleError::PastDate);
        }
        Ok(expiry.fixed_offset())
    }

    pub fn validate_create(
        &self,
        title: &str,
        description: &str,
        expiry: &str,
    ) -> Result<NewTodo, RuleError> {
        let expiry = self.parse_expiry(expiry)?;
        Ok(NewTodo {
            title: title.to_string(),
            description: description.to_string(),
            expiry,
        })
    }

    /// Replaces the text fields and expiry; completion and done flag are kept.
    pub fn validate_text_update(
        &self,
        existing: &Todo,
        title: &str,
        description: &str,
        expiry: &str,
    ) -> Result<Todo, RuleError> {
        let expiry = self.parse_expiry(expiry)?;
        Ok(Todo {
            title: title.to_string(),
            description: description.to_string(),
            expiry,
            ..existing.clone()
        })
    }

    pub fn validate_completion_update(
        &self,
        existing: &Todo,
        requested: f32,
    ) -> Result<Todo, RuleError> {
        if requested.is_nan() || requested <= existing.completion {
            return Err(RuleError::NotIncreasing {
                current: existing.completion,
                requested,
            });
        }
        Ok(Todo {
            completion: requested,
            ..existing.clone()
        })
    }

    pub fn validate_done_update(&self, existing: &Todo, requested: bool) -> Result<Todo, RuleError> {
        if !requested {
            return Err(RuleError::DoneIrreversible);
        }
        if existing.is_done {
            return Err(RuleError::AlreadyDone);
        }
        Ok(Todo {
            is_done: true,
            ..existing.clone()
        })
    }

    /// A `None` range means "no filter": list everything regardless of date
    /// or done status.
    pub fn resolve_period(
        &self,
        period: &str,
    ) -> Result<(Period, Option<ExpiryRange>), RuleError> {
        let period: Period = period.parse()?;
        Ok((period, period.range_at(self.clock.now())))
    }
}

/// Exactly `DDDD-DD-DD` in ASCII digits.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

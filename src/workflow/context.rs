//! Request-scoped context.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ActingUser, YearMonth};

/// Everything a single request carries into the engine: who is acting and
/// what time it is.
///
/// The clock is explicit so that "today" is fixed for the whole request and
/// can be pinned in tests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The user issuing the request.
    pub actor: ActingUser,
    /// The request time.
    pub now: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context stamped with the current time.
    pub fn new(actor: ActingUser) -> Self {
        Self::at(actor, Utc::now())
    }

    /// Creates a context at a fixed time.
    pub fn at(actor: ActingUser, now: DateTime<Utc>) -> Self {
        Self { actor, now }
    }

    /// The request date (UTC).
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// The month of the request date.
    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_current_month_follows_clock() {
        let actor = ActingUser {
            email: "e1@example.org".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            groups: vec![],
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let ctx = RequestContext::at(actor, now);

        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(ctx.current_month(), YearMonth::new(2024, 3).unwrap());
    }
}

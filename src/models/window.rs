use chrono::{Days, NaiveDate};

/// Named due-date windows, always resolved against a UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Today,
    Tomorrow,
    NextWeek,
}

/// Calendar-date predicate over `expiryDate` with the time of day stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryFilter {
    /// Expires on exactly this date.
    On(NaiveDate),
    /// Expires strictly after `after` and on or before `until`.
    Between { after: NaiveDate, until: NaiveDate },
}

impl DateWindow {
    pub const NEXT_WEEK_DAYS: u64 = 7;

    pub fn as_str(self) -> &'static str {
        match self {
            DateWindow::Today => "today",
            DateWindow::Tomorrow => "tomorrow",
            DateWindow::NextWeek => "nextweek",
        }
    }

    pub fn filter(self, today: NaiveDate) -> ExpiryFilter {
        match self {
            DateWindow::Today => ExpiryFilter::On(today),
            DateWindow::Tomorrow => ExpiryFilter::On(add_days(today, 1)),
            DateWindow::NextWeek => ExpiryFilter::Between {
                after: today,
                until: add_days(today, Self::NEXT_WEEK_DAYS),
            },
        }
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

//! Splitting a date range into bounded search windows.
//!
//! The search endpoint stops returning results after a few hundred items per query, so a long
//! range is walked backward from its most recent bound in windows of at most [`Interval`] each.

use crate::error::{Error, Result};
use jiff::{Span, Zoned};
use std::fmt;

/// The format every timestamp sent to the API is rendered in.
///
/// RFC 3339 with an explicit numeric offset and no sub-second component.
const RFC3339_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Renders `zoned` the way the `publishedBefore`/`publishedAfter` parameters expect it.
pub fn rfc3339(zoned: &Zoned) -> String {
    zoned.strftime(RFC3339_SECONDS).to_string()
}

/// The longest span of time a single search query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    days: u32,
}

impl Interval {
    /// Four weeks.
    pub const DEFAULT_DAYS: u32 = 28;

    pub fn from_days(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidInterval { days });
        }
        // reject lengths jiff cannot represent up front so iteration never has to
        Span::new()
            .try_days(i64::from(days))
            .map_err(|_| Error::InvalidInterval { days })?;
        Ok(Self { days })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    fn span(&self) -> Span {
        Span::new().days(i64::from(self.days))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            days: Self::DEFAULT_DAYS,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day(s)", self.days)
    }
}

/// The requested period, from `start` (most recent) back to `end` (oldest).
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    start: Zoned,
    end: Zoned,
}

impl DateRange {
    /// Fails with [`Error::InvalidDateRange`] if `start` is before `end`.
    pub fn new(start: Zoned, end: Zoned) -> Result<Self> {
        if start.timestamp() < end.timestamp() {
            return Err(Error::InvalidDateRange {
                start: rfc3339(&start),
                end: rfc3339(&end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &Zoned {
        &self.start
    }

    pub fn end(&self) -> &Zoned {
        &self.end
    }

    /// Windows covering the whole range, newest first.
    ///
    /// Consecutive windows share exactly one boundary, and the last window's lower bound is
    /// always `end`. A range where `start == end` yields a single empty window.
    pub fn windows(&self, interval: Interval) -> Windows {
        Windows {
            next_before: Some(self.start.clone()),
            end: self.end.clone(),
            span: interval.span(),
        }
    }
}

/// A single `(publishedAfter, publishedBefore)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub before: Zoned,
    pub after: Zoned,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", rfc3339(&self.after), rfc3339(&self.before))
    }
}

/// Iterator returned by [`DateRange::windows`].
#[derive(Debug, Clone)]
pub struct Windows {
    next_before: Option<Zoned>,
    end: Zoned,
    span: Span,
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        let before = self.next_before.take()?;

        let after = match before.checked_sub(self.span) {
            Ok(after) if after.timestamp() > self.end.timestamp() => after,
            // the remaining span is shorter than an interval (or we ran off the calendar)
            _ => self.end.clone(),
        };

        if after.timestamp() != self.end.timestamp() {
            self.next_before = Some(after.clone());
        }

        Some(Window { before, after })
    }
}

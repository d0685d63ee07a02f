use chrono::{Days, NaiveDate, Utc};

use crate::error::AnalysisError;
use crate::types::{DailyFollowerRow, DailyMentionRow};

/// A contiguous, inclusive span of calendar dates. Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalysisError> {
        if start > end {
            return Err(AnalysisError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the range, endpoints included. Always >= 1.
    #[must_use]
    pub fn total_days(&self) -> u64 {
        // start <= end, so the signed day count is non-negative.
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// Iterate every date from start to end inclusive, with no gaps.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// The trailing window used when neither stream produced any dated rows.
///
/// `days` is the number of rows the fallback range will contain; a window of
/// 30 days ending today spans today minus 29 days through today. The length
/// is always caller-supplied so the fallback is never silently hard-coded.
#[derive(Debug, Clone, Copy)]
pub struct FallbackWindow {
    pub days: u32,
    pub ending_on: NaiveDate,
}

impl FallbackWindow {
    /// A window of `days` days ending on today's UTC date. Zero is clamped to
    /// a single day.
    #[must_use]
    pub fn trailing(days: u32) -> Self {
        Self {
            days: days.max(1),
            ending_on: Utc::now().date_naive(),
        }
    }

    fn to_range(self) -> Result<DateRange, AnalysisError> {
        let back = u64::from(self.days.max(1) - 1);
        let start = self
            .ending_on
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN);
        DateRange::new(start, self.ending_on)
    }
}

/// Compute the contiguous span covering both aggregated streams.
///
/// The range runs from the minimum to the maximum date found across whichever
/// inputs are non-empty; with a single non-empty input the range is derived
/// solely from it. When both inputs are empty the caller-supplied `fallback`
/// window is used instead.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRange`] if the computed start postdates
/// the computed end — impossible for well-formed aggregator output, and
/// rejected loudly rather than producing an empty backbone.
pub fn unify_range(
    follower_rows: &[DailyFollowerRow],
    mention_rows: &[DailyMentionRow],
    fallback: FallbackWindow,
) -> Result<DateRange, AnalysisError> {
    let dates = follower_rows
        .iter()
        .map(|r| r.date)
        .chain(mention_rows.iter().map(|r| r.date));

    let min = dates.clone().min();
    let max = dates.max();

    match (min, max) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => fallback.to_range(),
    }
}

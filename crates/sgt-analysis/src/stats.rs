//! Summary statistics over the merged comparison table.
//!
//! Mean and standard deviation use the sample formulas (n - 1 denominator),
//! with std defined as 0.0 below two rows. The Pearson coefficient is
//! reported as `None` — "cannot be computed", as opposed to "no linear
//! relationship" — whenever fewer than two rows exist or either series has
//! zero variance.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::MergedRow;

#[derive(Debug, Clone, Serialize)]
pub struct DateRangeSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowerSeriesSummary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub std: f64,
    /// Last value minus first value in date-ascending order.
    pub change: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentionSeriesSummary {
    pub total: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub std: f64,
    /// Days where the mention count exceeds zero.
    pub active_days: u64,
}

/// Read-only snapshot of the merged table's statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    pub date_range: DateRangeSummary,
    pub steam_followers: FollowerSeriesSummary,
    pub reddit_mentions: MentionSeriesSummary,
    /// Pearson correlation between the two series; `None` when undefined.
    pub correlation: Option<f64>,
}

/// Compute summary statistics over a merged table.
///
/// Returns `None` for an empty table — callers must check before rendering.
/// A single-row table yields `std = 0.0`, `change = 0`, and no correlation.
#[must_use]
pub fn compute_summary(rows: &[MergedRow]) -> Option<SummaryStatistics> {
    let (first, last) = (rows.first()?, rows.last()?);

    let steam: Vec<u64> = rows.iter().map(|r| r.steam_followers_count).collect();
    let mentions: Vec<u64> = rows.iter().map(|r| r.mentions_in_social_media).collect();

    let steam_f: Vec<f64> = steam.iter().map(|&v| as_f64(v)).collect();
    let mentions_f: Vec<f64> = mentions.iter().map(|&v| as_f64(v)).collect();

    let steam_mean = mean(&steam_f);
    let mentions_mean = mean(&mentions_f);

    #[allow(clippy::cast_possible_wrap)]
    let change = last.steam_followers_count as i64 - first.steam_followers_count as i64;

    Some(SummaryStatistics {
        date_range: DateRangeSummary {
            start: first.date,
            end: last.date,
            total_days: rows.len() as u64,
        },
        steam_followers: FollowerSeriesSummary {
            min: steam.iter().copied().min().unwrap_or(0),
            max: steam.iter().copied().max().unwrap_or(0),
            mean: steam_mean,
            std: sample_std(&steam_f, steam_mean),
            change,
        },
        reddit_mentions: MentionSeriesSummary {
            total: mentions.iter().sum(),
            min: mentions.iter().copied().min().unwrap_or(0),
            max: mentions.iter().copied().max().unwrap_or(0),
            mean: mentions_mean,
            std: sample_std(&mentions_f, mentions_mean),
            active_days: mentions.iter().filter(|&&m| m > 0).count() as u64,
        },
        correlation: pearson(&steam_f, &mentions_f),
    })
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: u64) -> f64 {
    value as f64
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0.0 below two values.
#[allow(clippy::cast_precision_loss)]
fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient; `None` below two pairs or when either
/// series has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let x_std = sample_std(xs, x_mean);
    let y_std = sample_std(ys, y_mean);
    if x_std == 0.0 || y_std == 0.0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let covariance = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum::<f64>()
        / (xs.len() - 1) as f64;

    Some(covariance / (x_std * y_std))
}

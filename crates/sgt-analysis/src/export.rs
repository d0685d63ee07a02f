//! CSV export of the merged table and raw per-source dumps.
//!
//! All writers create the destination directory if needed, auto-generate a
//! timestamped filename when none is supplied (never silently overwriting an
//! ambiguous name), and return the path actually written. File handles are
//! scoped to the writing function, so they are closed on every exit path
//! including write errors. IO failures propagate as [`AnalysisError::Io`];
//! retrying belongs to the caller.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use sgt_core::{FollowerObservation, MentionEvent};

use crate::csv::write_record;
use crate::error::AnalysisError;
use crate::types::MergedRow;

/// Fixed column order of the merged-table CSV.
const MERGED_HEADER: [&str; 3] = ["date", "steam_followers_count", "mentions_in_social_media"];

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> AnalysisError + '_ {
    move |source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn timestamped(prefix: &str) -> String {
    format!("{prefix}_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"))
}

fn open_for_write(data_dir: &Path, filename: &str) -> Result<(PathBuf, BufWriter<File>), AnalysisError> {
    fs::create_dir_all(data_dir).map_err(io_err(data_dir))?;
    let path = data_dir.join(filename);
    let file = File::create(&path).map_err(io_err(&path))?;
    Ok((path, BufWriter::new(file)))
}

/// Write the merged table as CSV with the fixed column order
/// `date,steam_followers_count,mentions_in_social_media` and `YYYY-MM-DD`
/// dates. Returns the path written.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] when the directory cannot be created or the
/// file cannot be written.
pub fn write_merged_csv(
    rows: &[MergedRow],
    data_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf, AnalysisError> {
    let name = filename.map_or_else(|| timestamped("steam_reddit_comparison"), ToOwned::to_owned);
    let (path, mut out) = open_for_write(data_dir, &name)?;

    write_record(&mut out, &MERGED_HEADER.map(ToOwned::to_owned)).map_err(io_err(&path))?;
    for row in rows {
        write_record(
            &mut out,
            &[
                row.date.format("%Y-%m-%d").to_string(),
                row.steam_followers_count.to_string(),
                row.mentions_in_social_media.to_string(),
            ],
        )
        .map_err(io_err(&path))?;
    }
    out.flush().map_err(io_err(&path))?;

    Ok(path)
}

/// Dump raw follower observations, preserving every field including origin.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] on directory or file write failure.
pub fn write_raw_followers_csv(
    observations: &[FollowerObservation],
    data_dir: &Path,
) -> Result<PathBuf, AnalysisError> {
    let (path, mut out) = open_for_write(data_dir, &timestamped("steam_raw"))?;

    let header = ["app_id", "game_name", "observed_at", "follower_count", "origin"];
    write_record(&mut out, &header.map(ToOwned::to_owned)).map_err(io_err(&path))?;
    for obs in observations {
        write_record(
            &mut out,
            &[
                obs.app_id.clone(),
                obs.game_name.clone(),
                obs.observed_at.to_rfc3339(),
                obs.follower_count.to_string(),
                obs.origin.as_str().to_string(),
            ],
        )
        .map_err(io_err(&path))?;
    }
    out.flush().map_err(io_err(&path))?;

    Ok(path)
}

/// Dump raw mention events, preserving every field.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] on directory or file write failure.
pub fn write_raw_mentions_csv(
    events: &[MentionEvent],
    data_dir: &Path,
) -> Result<PathBuf, AnalysisError> {
    let (path, mut out) = open_for_write(data_dir, &timestamped("reddit_raw"))?;

    let header = [
        "id",
        "title",
        "subreddit",
        "author",
        "created_utc",
        "score",
        "num_comments",
        "url",
    ];
    write_record(&mut out, &header.map(ToOwned::to_owned)).map_err(io_err(&path))?;
    for event in events {
        write_record(
            &mut out,
            &[
                event.id.clone(),
                event.title.clone(),
                event.subreddit.clone(),
                event.author.clone(),
                event.created_utc.to_rfc3339(),
                event.score.to_string(),
                event.num_comments.to_string(),
                event.url.clone(),
            ],
        )
        .map_err(io_err(&path))?;
    }
    out.flush().map_err(io_err(&path))?;

    Ok(path)
}

//! Full analysis workflow: collect both sources, reconcile, export.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use sgt_analysis::{
    analyze, write_merged_csv, write_raw_followers_csv, write_raw_mentions_csv, MergedRow,
    SummaryStatistics,
};
use sgt_reddit::{MentionSource, RedditClient};
use sgt_steam::{FollowerSource, SteamDbClient};

use crate::middleware::RequestId;

use super::export::ExportInfo;
use super::{map_io_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct AnalyzeRequest {
    pub game_name: String,
    pub days: Option<u32>,
    pub simulate: Option<bool>,
    pub export_csv: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct AnalyzeData {
    pub game_name: String,
    pub app_id: String,
    pub days: u32,
    pub rows: Vec<MergedRow>,
    pub stats: Option<SummaryStatistics>,
    pub collected: CollectedCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportInfo>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct CollectedCounts {
    pub follower_observations: usize,
    pub mentions: usize,
}

/// POST /api/v1/analyze — run the complete workflow for one game.
pub(in crate::api) async fn analyze_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AnalyzeData>>), ApiError> {
    let rid = &req_id.0;
    let config = &state.config;

    let game_name = body.game_name.trim().to_owned();
    if game_name.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "game_name is required",
        ));
    }

    let days = body.days.unwrap_or(config.default_window_days);
    if days == 0 || days > 365 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("days must be between 1 and 365, got {days}"),
        ));
    }

    let simulate = body.simulate.unwrap_or(false);
    let follower_source = build_follower_source(config, simulate);
    let mention_source = build_mention_source(config, simulate).await;

    let collected = follower_source.collect(&game_name, days).await;
    let mentions = mention_source.collect_or_simulate(&game_name, days).await;

    let analysis = analyze(&collected.observations, &mentions, days).map_err(|error| {
        tracing::error!(error = %error, "analysis pipeline failed");
        ApiError::new(rid, "internal_error", "analysis failed")
    })?;

    // Raw dumps are best-effort; the analysis still returns when they fail.
    if let Err(error) = write_raw_followers_csv(&collected.observations, &config.data_dir) {
        tracing::warn!(error = %error, "failed to save raw follower dump");
    }
    if let Err(error) = write_raw_mentions_csv(&mentions, &config.data_dir) {
        tracing::warn!(error = %error, "failed to save raw mention dump");
    }

    let export = if body.export_csv.unwrap_or(true) {
        let filename = format!(
            "{}_analysis.csv",
            collected.game_name.to_lowercase().replace(' ', "_")
        );
        let path = write_merged_csv(&analysis.rows, &config.data_dir, Some(&filename))
            .map_err(|e| map_io_error(rid.clone(), &e))?;
        Some(ExportInfo::from_path(&path))
    } else {
        None
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: AnalyzeData {
                game_name: collected.game_name.clone(),
                app_id: collected.app_id.clone(),
                days,
                rows: analysis.rows,
                stats: analysis.stats,
                collected: CollectedCounts {
                    follower_observations: collected.observations.len(),
                    mentions: mentions.len(),
                },
                export,
            },
            meta: ResponseMeta::new(rid.clone()),
        }),
    ))
}

fn build_follower_source(config: &sgt_core::AppConfig, simulate: bool) -> FollowerSource {
    if simulate {
        return FollowerSource::Simulated;
    }
    match SteamDbClient::new(
        &config.steam_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
        config.scraper_inter_request_delay_ms,
    ) {
        Ok(client) => FollowerSource::Live(client),
        Err(error) => {
            tracing::warn!(error = %error, "failed to build SteamDB client; using simulated source");
            FollowerSource::Simulated
        }
    }
}

async fn build_mention_source(config: &sgt_core::AppConfig, simulate: bool) -> MentionSource {
    if simulate {
        return MentionSource::Simulated;
    }
    match &config.reddit_credentials {
        Some(credentials) => {
            match RedditClient::new(credentials, &config.reddit_user_agent).await {
                Ok(client) => MentionSource::Live(client),
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "Reddit authentication failed; using simulated mentions"
                    );
                    MentionSource::Simulated
                }
            }
        }
        None => {
            tracing::info!("Reddit credentials not configured; using simulated mentions");
            MentionSource::Simulated
        }
    }
}

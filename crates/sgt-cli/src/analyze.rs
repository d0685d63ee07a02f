//! The `analyze` subcommand: end-to-end collection, reconciliation, and
//! reporting for a single game.

use clap::Args;

use sgt_analysis::{
    analyze, format_table, write_merged_csv, write_raw_followers_csv, write_raw_mentions_csv,
};
use sgt_reddit::{MentionSource, RedditClient};
use sgt_steam::{FollowerSource, SteamDbClient};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Game to analyze, e.g. "Cyberpunk 2077".
    pub game: String,

    /// Days of history to collect (defaults to the configured window).
    #[arg(long)]
    pub days: Option<u32>,

    /// Maximum number of table rows to print.
    #[arg(long, default_value_t = 20)]
    pub max_rows: usize,

    /// Skip the network and use the deterministic simulators.
    #[arg(long)]
    pub simulate: bool,

    /// Export filename (defaults to "<game>_analysis.csv").
    #[arg(long)]
    pub out: Option<String>,

    /// Skip the merged CSV export.
    #[arg(long)]
    pub no_export: bool,

    /// Also dump the raw observations and mentions as CSV.
    #[arg(long)]
    pub save_raw: bool,
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = sgt_core::load_app_config()?;
    let days = args.days.unwrap_or(config.default_window_days);
    anyhow::ensure!(
        (1..=365).contains(&days),
        "days must be between 1 and 365, got {days}"
    );

    println!("Analyzing '{}' over the last {days} days", args.game);

    let follower_source = if args.simulate {
        FollowerSource::Simulated
    } else {
        FollowerSource::Live(SteamDbClient::new(
            &config.steam_base_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
            config.scraper_inter_request_delay_ms,
        )?)
    };

    let mention_source = if args.simulate {
        MentionSource::Simulated
    } else {
        build_live_mention_source(&config).await
    };

    let collected = follower_source.collect(&args.game, days).await;
    println!(
        "Collected {} follower observations for {} (app id {})",
        collected.observations.len(),
        collected.game_name,
        collected.app_id
    );

    let mentions = mention_source.collect_or_simulate(&args.game, days).await;
    println!("Collected {} Reddit mentions", mentions.len());
    println!();

    let analysis = analyze(&collected.observations, &mentions, days)?;
    print!("{}", format_table(&analysis.rows, args.max_rows));

    if let Some(stats) = &analysis.stats {
        println!();
        println!(
            "Analysis period: {} to {} ({} days)",
            stats.date_range.start, stats.date_range.end, stats.date_range.total_days
        );
        println!(
            "Steam follower change over period: {:+}",
            stats.steam_followers.change
        );
    }

    if !args.no_export {
        let filename = args.out.clone().unwrap_or_else(|| {
            format!(
                "{}_analysis.csv",
                collected.game_name.to_lowercase().replace(' ', "_")
            )
        });
        let path = write_merged_csv(&analysis.rows, &config.data_dir, Some(&filename))?;
        println!("Exported merged table to {}", path.display());
    }

    if args.save_raw {
        let followers_path = write_raw_followers_csv(&collected.observations, &config.data_dir)?;
        let mentions_path = write_raw_mentions_csv(&mentions, &config.data_dir)?;
        println!(
            "Saved raw dumps to {} and {}",
            followers_path.display(),
            mentions_path.display()
        );
    }

    Ok(())
}

async fn build_live_mention_source(config: &sgt_core::AppConfig) -> MentionSource {
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

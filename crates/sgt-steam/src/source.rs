use sgt_core::{FollowerObservation, Origin};

use crate::catalog::{catalog_lookup, display_name_for, synthetic_app_id};
use crate::client::SteamDbClient;
use crate::simulate::{simulated_current_count, simulated_history};

/// Follower observations for one game, together with the identity the
/// collection resolved to.
#[derive(Debug, Clone)]
pub struct CollectedFollowers {
    pub app_id: String,
    pub game_name: String,
    /// Oldest first, one per day over the requested window.
    pub observations: Vec<FollowerObservation>,
}

/// Where follower data comes from.
///
/// `Live` scrapes SteamDB for the current count and anchors a backfilled
/// history at it; any scrape failure degrades to a fully simulated history
/// with a warning, so collection itself never fails. `Simulated` skips the
/// network entirely.
pub enum FollowerSource {
    Live(SteamDbClient),
    Simulated,
}

impl FollowerSource {
    /// Collects a follower history of `days` observations for `game_name`,
    /// ending today.
    ///
    /// Identity resolution runs local catalog first, then (live only) a
    /// SteamDB search, then a stable synthetic id derived from the name.
    pub async fn collect(&self, game_name: &str, days: u32) -> CollectedFollowers {
        match self {
            Self::Live(client) => Self::collect_live(client, game_name, days).await,
            Self::Simulated => Self::collect_simulated(game_name, days),
        }
    }

    async fn collect_live(
        client: &SteamDbClient,
        game_name: &str,
        days: u32,
    ) -> CollectedFollowers {
        let resolved = match catalog_lookup(game_name) {
            Some((app_id, baseline)) => {
                Some((app_id.to_owned(), display_name_for(app_id), Some(baseline)))
            }
            None => match client.search_app(game_name).await {
                Ok(Some(hit)) => {
                    let name = hit.name.unwrap_or_else(|| game_name.to_owned());
                    Some((hit.app_id, name, None))
                }
                Ok(None) => {
                    tracing::info!(game_name, "no SteamDB search results; using synthetic id");
                    None
                }
                Err(error) => {
                    tracing::warn!(game_name, %error, "SteamDB search failed; using synthetic id");
                    None
                }
            },
        };

        let Some((app_id, name, baseline)) = resolved else {
            return Self::collect_simulated(game_name, days);
        };

        tokio::time::sleep(client.inter_request_delay()).await;

        let (anchor, origin) = match client.current_follower_count(&app_id).await {
            Ok(count) => (count, Origin::Live),
            Err(error) => {
                tracing::warn!(
                    app_id,
                    %error,
                    "follower scrape failed; falling back to simulated count"
                );
                (simulated_current_count(&app_id, baseline), Origin::Synthetic)
            }
        };

        let observations = simulated_history(&app_id, &name, days, anchor, origin);
        CollectedFollowers {
            app_id,
            game_name: name,
            observations,
        }
    }

    fn collect_simulated(game_name: &str, days: u32) -> CollectedFollowers {
        let (app_id, name, baseline) = match catalog_lookup(game_name) {
            Some((app_id, baseline)) => {
                (app_id.to_owned(), display_name_for(app_id), Some(baseline))
            }
            None => (synthetic_app_id(game_name), game_name.to_owned(), None),
        };

        let anchor = simulated_current_count(&app_id, baseline);
        let observations =
            simulated_history(&app_id, &name, days, anchor, Origin::Synthetic);
        CollectedFollowers {
            app_id,
            game_name: name,
            observations,
        }
    }
}

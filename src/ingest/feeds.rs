// Feed access for the population job: two top-list JSON documents, each an
// array of rank-groups (arrays) of raw records.

use serde::Deserialize;
use std::time::Duration;

use crate::error::CatalogError;
use crate::util::env;

pub const ANDROID_TOP_URL: &str =
    "https://interview-marketing-eng-dev.s3.eu-west-1.amazonaws.com/android.top100.json";
pub const IOS_TOP_URL: &str =
    "https://interview-marketing-eng-dev.s3.eu-west-1.amazonaws.com/ios.top100.json";

/// One raw record as served by the feeds. Nothing is guaranteed present;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeedRecord {
    #[serde(default)]
    pub publisher_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "appId")]
    pub app_id: Option<String>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub publisher_profile_url: Option<String>,
}

/// Collapse rank-groups into a flat record sequence, preserving rank order.
pub fn flatten_rank_groups(groups: Vec<Vec<RawFeedRecord>>) -> Vec<RawFeedRecord> {
    groups.into_iter().flatten().collect()
}

/// HTTP client for the two top-list feeds. URLs and the per-request timeout
/// come from the environment so tests and dev setups can point elsewhere.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    android_url: String,
    ios_url: String,
}

impl FeedClient {
    /// Env: FEED_ANDROID_URL / FEED_IOS_URL / FEED_TIMEOUT_SECS (default 30).
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout_secs: u64 = env::env_parse("FEED_TIMEOUT_SECS", 30u64);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            android_url: env::env_opt("FEED_ANDROID_URL")
                .unwrap_or_else(|| ANDROID_TOP_URL.to_string()),
            ios_url: env::env_opt("FEED_IOS_URL").unwrap_or_else(|| IOS_TOP_URL.to_string()),
        })
    }

    /// Fetch both top lists concurrently and flatten each one level.
    /// Returned as (android, ios).
    pub async fn fetch_top_lists(
        &self,
    ) -> Result<(Vec<RawFeedRecord>, Vec<RawFeedRecord>), CatalogError> {
        tokio::try_join!(
            self.fetch_feed(&self.android_url),
            self.fetch_feed(&self.ios_url)
        )
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawFeedRecord>, CatalogError> {
        let groups: Vec<Vec<RawFeedRecord>> = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| CatalogError::UpstreamFetch {
                url: url.to_string(),
                source,
            })?
            .json()
            .await
            .map_err(|source| CatalogError::UpstreamFetch {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!(url, groups = groups.len(), "feed fetched");
        Ok(flatten_rank_groups(groups))
    }
}

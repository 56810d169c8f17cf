//! Reddit search client
//!
//! Uses the public listing endpoint
//! `GET https://www.reddit.com/r/{subreddit}/search.json` with the query
//! `subreddit:<name> title:Bike Tag`. Listings nest each post as
//! `data.children[].data`.

use super::{request_error, PostQuery, PostSource, SourceError};
use crate::types::RedditPost;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Reddit base URL
const REDDIT_URL: &str = "https://www.reddit.com";

/// Default timeout for Reddit requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// User-Agent header (Reddit rejects generic agents)
const USER_AGENT: &str = "biketag/0.1.0 (tag resolution)";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RedditPost,
}

/// Reddit client
pub struct RedditClient {
    http_client: Client,
    base_url: String,
}

impl RedditClient {
    pub fn new() -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: REDDIT_URL.to_string(),
        })
    }

    /// Point the client at another host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Search string for Bike Tag posts in `subreddit`
pub fn search_query(subreddit: &str) -> String {
    format!("subreddit:{} title:Bike Tag", subreddit)
}

/// Posts from a search listing body
fn parse_listing(body: &str) -> Result<Vec<RedditPost>, SourceError> {
    let listing: Listing = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("Failed to parse Reddit listing: {}", e)))?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data)
        .collect())
}

#[async_trait]
impl PostSource for RedditClient {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &PostQuery,
    ) -> Result<Vec<RedditPost>, SourceError> {
        let url = format!("{}/r/{}/search.json", self.base_url, subreddit);
        let limit = query.limit.to_string();
        let params = [
            ("q", search_query(subreddit)),
            ("restrict_sr", "1".to_string()),
            ("sort", query.sort.clone()),
            ("limit", limit),
            ("t", query.time.clone()),
        ];

        debug!(subreddit = %subreddit, sort = %query.sort, limit = query.limit, "Searching Reddit");

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| request_error("Reddit", e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(SourceError::NotAvailable(format!(
                "Subreddit not found: {}",
                subreddit
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| request_error("Reddit", e))?;
        let posts = parse_listing(&body)?;
        debug!(subreddit = %subreddit, count = posts.len(), "Reddit search complete");
        Ok(posts)
    }
}

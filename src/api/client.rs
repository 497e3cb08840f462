use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, Result};
use super::models::*;
use super::params::{CalendarTab, RankingType};

/// Default API root of the MaxBreak backend
pub const DEFAULT_BASE_URL: &str = "https://maxbreak-production.up.railway.app/oneFourSeven";

/// Request timeout; live match endpoints can be slow
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Async client for the MaxBreak REST API
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the default backend
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for a specific API root, e.g. `http://localhost:8000/oneFourSeven`
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET an endpoint and decode the JSON body, mapping non-2xx statuses to errors
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(endpoint);
        debug!("HTTP: GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if (200..300).contains(&status) {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body: serde_json::Value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
        let err = ApiError::from_status(status, &body);
        warn!("HTTP: GET {} failed: {}", url, err);
        Err(err)
    }

    pub async fn calendar(&self, tab: CalendarTab, season: Option<i32>) -> Result<Calendar> {
        self.get(&format!("/calendar/{}/", tab.as_str()), &season_query(season))
            .await
    }

    pub async fn event(&self, event_id: i64) -> Result<Event> {
        self.get(&format!("/events/{}/", event_id), &[]).await
    }

    pub async fn event_matches(&self, event_id: i64) -> Result<Vec<MatchRecord>> {
        self.get(&format!("/events/{}/matches/", event_id), &[]).await
    }

    pub async fn match_detail(&self, api_match_id: i64) -> Result<MatchRecord> {
        self.get(&format!("/matches/{}/", api_match_id), &[]).await
    }

    pub async fn player(&self, player_id: i64) -> Result<Player> {
        self.get(&format!("/players/{}/", player_id), &[]).await
    }

    pub async fn rankings(&self, ranking_type: RankingType, season: Option<i32>) -> Result<RankingTable> {
        self.get(
            &format!("/rankings/{}/", ranking_type.as_str()),
            &season_query(season),
        )
        .await
    }

    pub async fn head_to_head(&self, player1_id: i64, player2_id: i64) -> Result<HeadToHead> {
        self.get(&format!("/h2h/{}/{}/", player1_id, player2_id), &[])
            .await
    }

    pub async fn prize_money(&self, event_id: i64) -> Result<PrizeBreakdown> {
        self.get(&format!("/events/{}/prize-money/", event_id), &[])
            .await
    }

    /// Format of a round in a season; the backend answers with a one-element list
    pub async fn round_format(&self, round: i32, season: i32) -> Result<RoundFormat> {
        let formats: Vec<RoundFormat> = self
            .get(&format!("/round-format/{}/{}/", round, season), &[])
            .await?;
        formats.into_iter().next().ok_or_else(|| ApiError::NotFound {
            message: format!("No format for round {} in season {}", round, season),
        })
    }

    /// Formatted prize money per round of an event
    pub async fn round_prizes(&self, event_id: i64) -> Result<RoundPrizes> {
        self.get(&format!("/events/{}/round-prizes/", event_id), &[])
            .await
    }
}

fn season_query(season: Option<i32>) -> Vec<(&'static str, String)> {
    season
        .map(|s| vec![("season", s.to_string())])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = Client::with_base_url("http://localhost:8000/oneFourSeven/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/oneFourSeven");
        assert_eq!(
            client.url("/events/5/matches/"),
            "http://localhost:8000/oneFourSeven/events/5/matches/"
        );
    }

    #[test]
    fn test_default_client_uses_default_base_url() {
        let client = Client::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_season_query() {
        assert!(season_query(None).is_empty());
        assert_eq!(season_query(Some(2025)), vec![("season", "2025".to_string())]);
    }

    #[tokio::test]
    #[ignore] // Integration test - depends on local networking
    async fn test_unreachable_host_is_request_failed() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = Client::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.event(1).await.unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed(_)));
        assert!(err.is_transient());
    }
}

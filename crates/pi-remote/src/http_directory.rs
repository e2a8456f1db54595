use crate::player_row::NewPlayer;
use crate::{DirectoryError, RemoteDirectory, Result as DirectoryResult};

use pi_core::{PlayerId, Profile, UsernameSeed};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client as ReqwestClient, Method};

const REST_PREFIX: &str = "/rest/v1";
const PROFILE_COLUMNS: &str = "id,username,account_ref";

/// Player directory reached through a REST table API.
///
/// Rows are addressed as `{base_url}/rest/v1/{table}` with filter query
/// parameters (`id=eq.42`) and come back as JSON arrays.
pub struct HttpDirectory {
    pub base_url: String,
    pub table: String,
    api_key: Option<String>,
    client: ReqwestClient,
}

impl HttpDirectory {
    /// Create a new directory client
    ///
    /// # Arguments
    /// * `base_url` - Service URL (e.g., "http://127.0.0.1:54321")
    /// * `table` - Table holding player rows
    /// * `api_key` - Optional key sent as `apikey` and bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> DirectoryResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::setup(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key: api_key.map(String::from),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}{}/{}", self.base_url, REST_PREFIX, self.table)
    }

    /// Build a request with the API key headers
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        if let Some(ref key) = self.api_key {
            req = req
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}"));
        }

        req
    }

    /// Execute request and decode the returned rows
    async fn execute(&self, req: reqwest::RequestBuilder) -> DirectoryResult<Vec<Profile>> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::from_status(status.as_u16(), body));
        }

        Ok(response.json::<Vec<Profile>>().await?)
    }
}

#[async_trait]
impl RemoteDirectory for HttpDirectory {
    async fn create_profile(&self, seed: &UsernameSeed) -> DirectoryResult<Profile> {
        let username = seed.generate();
        let body = NewPlayer {
            username: &username,
        };

        let req = self
            .request(Method::POST, &self.table_url())
            .header("Prefer", "return=representation")
            .json(&body);

        let profile = self
            .execute(req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::decode("insert returned no rows"))?;

        info!("Created player {} ({})", profile.id, profile.username);
        Ok(profile)
    }

    async fn fetch_profile(&self, id: PlayerId) -> DirectoryResult<Profile> {
        let url = format!("{}?id=eq.{id}&select={PROFILE_COLUMNS}", self.table_url());
        let req = self.request(Method::GET, &url);

        let profile = self
            .execute(req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::not_found(id))?;

        debug!("Fetched player {id}");
        Ok(profile)
    }
}

//! Metaphor API client.
//!
//! Metaphor serves both collaborators the remote pipeline needs: page
//! contents by document id, and neural search over recent pages. The client
//! blocks on a private current-thread runtime.

use crate::config::RemoteConfig;
use crate::error::{Error, InputError, Result, SearchError};
use crate::io::HtmlStripper;
use crate::search::{RelatedSearch, SearchHit};
use crate::source::DocumentSource;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

/// Request body for `POST /search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    use_autoprompt: bool,
    start_published_date: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    contents: Vec<DocumentContent>,
}

#[derive(Debug, Deserialize)]
struct DocumentContent {
    #[serde(default)]
    extract: Option<String>,
}

/// Client for the Metaphor search and contents endpoints.
pub struct MetaphorClient {
    http: reqwest::Client,
    runtime: Runtime,
    base_url: String,
    api_key: String,
    stripper: HtmlStripper,
}

impl MetaphorClient {
    /// Creates a client from the remote configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no Metaphor key is set, or a search
    /// error if the runtime cannot be started.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let api_key = config.require_metaphor_key()?.to_string();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SearchError::Request(format!("runtime error: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            runtime,
            base_url: config.metaphor_url.clone(),
            api_key,
            stripper: HtmlStripper::new()?,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn contents_url(&self) -> String {
        format!("{}/contents", self.base_url)
    }

    /// Sends a prepared request and decodes the JSON response.
    fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, Failure> {
        self.runtime.block_on(self.send_async(request))
    }

    async fn send_async<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, Failure> {
        let response = request
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| Failure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Failure::Status(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Failure::Decode(e.to_string()))
    }
}

/// A failed exchange, before it is attributed to an endpoint.
#[derive(Debug)]
enum Failure {
    Transport(String),
    Status(StatusCode, String),
    Decode(String),
}

impl Failure {
    fn into_search_error(self) -> Error {
        let err = match self {
            Self::Transport(e) => SearchError::Request(format!("HTTP error: {e}")),
            Self::Status(status, body) => {
                SearchError::Request(format!("API returned {status}: {body}"))
            }
            Self::Decode(e) => SearchError::Decode(e),
        };
        err.into()
    }

    /// Unknown or malformed ids come back as 400 or 404 from `/contents`.
    fn into_fetch_error(self, id: &str) -> Error {
        let id = id.to_string();
        let err = match self {
            Self::Status(status, _)
                if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST =>
            {
                InputError::ContentNotFound { id }
            }
            Self::Status(status, body) => InputError::Fetch {
                id,
                reason: format!("API returned {status}: {body}"),
            },
            Self::Transport(e) => InputError::Fetch {
                id,
                reason: format!("HTTP error: {e}"),
            },
            Self::Decode(e) => InputError::Fetch {
                id,
                reason: format!("undecodable response: {e}"),
            },
        };
        err.into()
    }
}

impl RelatedSearch for MetaphorClient {
    fn search(&self, query: &str, published_after: NaiveDate) -> Result<Vec<SearchHit>> {
        let body = SearchRequest {
            query,
            use_autoprompt: true,
            start_published_date: published_after.format("%Y-%m-%d").to_string(),
        };
        info!(query, since = %published_after, "searching related pages");

        let response: SearchResponse = self
            .send(self.http.post(self.search_url()).json(&body))
            .map_err(Failure::into_search_error)?;
        debug!(results = response.results.len(), "search complete");

        Ok(response
            .results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title.unwrap_or_default(),
                url: r.url,
            })
            .collect())
    }
}

impl DocumentSource for MetaphorClient {
    fn fetch(&self, id: &str) -> Result<String> {
        info!(id, "fetching document contents");
        let request = self.http.get(self.contents_url()).query(&[("ids", id)]);
        let response: ContentsResponse = self
            .send(request)
            .map_err(|failure| failure.into_fetch_error(id))?;

        let Some(extract) = response.contents.into_iter().find_map(|c| c.extract) else {
            warn!(id, "no contents returned");
            return Err(InputError::ContentNotFound { id: id.to_string() }.into());
        };
        Ok(self.stripper.strip(&extract))
    }

    fn name(&self) -> &'static str {
        "metaphor"
    }
}

impl std::fmt::Debug for MetaphorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaphorClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

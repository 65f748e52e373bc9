use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use crate::day::PuzzleId;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch problem from {url}: {status}")]
    Status { url: String, status: StatusCode },
}

/// Retrieves problem pages. The HTTP client is owned by the caller.
pub struct Fetcher {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl Fetcher {
    pub fn new(client: Client, base_url: &str) -> Self {
        Fetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// Session cookie sent with each request; part two only shows up for a
    /// logged-in user who solved part one.
    pub fn with_session(mut self, session: Option<String>) -> Self {
        self.session = session.filter(|s| !s.is_empty());
        self
    }

    pub fn problem_url(&self, id: PuzzleId) -> String {
        format!("{}/{}/day/{}", self.base_url, id.year, id.day)
    }

    /// Single GET, no retries.
    pub async fn fetch(&self, id: PuzzleId) -> Result<String, FetchError> {
        let url = self.problem_url(id);
        info!("Fetching problem: {}", url);

        let mut request = self.client.get(&url);
        if let Some(session) = &self.session {
            request = request.header(COOKIE, format!("session={session}"));
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        match response.text().await {
            Ok(body) => Ok(body),
            Err(source) => Err(FetchError::Transport { url, source }),
        }
    }
}

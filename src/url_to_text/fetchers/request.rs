use crate::config::ImportConfig;
use crate::error::ImportError;
use log::debug;
use reqwest::{redirect, Client};
use url::Url;

/// Body and final address of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Address after following redirects
    pub final_url: Url,
    pub body: Vec<u8>,
}

/// Plain HTTP GET with an identifying user agent, bounded redirects and a timeout.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &ImportConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ImportError::ClientError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Non-success statuses are errors; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ImportError> {
        let url = Url::parse(url.trim())?;
        debug!("RequestFetcher: GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().clone();
        let body = response.bytes().await?.to_vec();
        debug!(
            "RequestFetcher: {} bytes from {}",
            body.len(),
            final_url
        );

        Ok(FetchedPage { final_url, body })
    }
}

//! HTML page retrieval.
//!
//! The pipeline only ever needs "give me the HTML at this URL", so that is
//! the whole seam: [`PageSource`]. [`HttpFetcher`] is the real implementation
//! over a shared `reqwest` client. Parsing into a queryable tree happens in
//! [`fetch_document`], kept synchronous so no `Html` value lives across an
//! await point.

use crate::error::{Error, Result};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, instrument};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can return the HTML body behind a URL.
pub trait PageSource {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// [`PageSource`] backed by plain HTTP GET requests.
///
/// No retries and no timeout beyond the client defaults.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let fetch_err = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_err(format!("failed to read body: {e}")))?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// Fetch `url` from `source` and parse it as an HTML document.
pub async fn fetch_document<S: PageSource>(source: &S, url: &str) -> Result<Html> {
    let body = source.fetch_html(url).await?;
    Ok(Html::parse_document(&body))
}

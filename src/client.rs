//! HTTP client for the TeraBox share-listing endpoint.

use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use crate::error::{RelayError, Result};
use crate::models::ShareListResponse;
use crate::url_parser::ShareLink;

/// Base URL for the public TeraBox share API.
const SHARE_API_BASE: &str = "https://www.terabox.com";

/// Upper bound on the single outbound lookup call.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed page size for the listing request; pagination is out of scope.
const PAGE_SIZE: &str = "20";

/// The remote rejects requests that do not look like a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Client for looking up shared file listings on TeraBox.
#[derive(Debug, Clone)]
pub struct ShareListClient {
    http: Client,
    base_url: String,
}

impl ShareListClient {
    /// Create a client against the production TeraBox endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(SHARE_API_BASE)
    }

    /// Create a client against an alternate base URL.
    ///
    /// This is the seam tests use to point the lookup at a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch the file listing behind a share link.
    ///
    /// Issues exactly one GET to `{base}/share/list`. A non-zero remote
    /// `errno` and an empty file list are both failures, reported as distinct
    /// [`RelayError`] variants; transport faults and malformed bodies surface
    /// as [`RelayError::Http`]. Nothing here panics or retries.
    pub async fn fetch_share_list(&self, link: &ShareLink) -> Result<ShareListResponse> {
        info!("Fetching file metadata for surl: {}", link.surl);

        let response = self
            .http
            .get(format!("{}/share/list", self.base_url))
            .query(&[
                ("shorturl", link.surl.as_str()),
                ("root", "1"),
                ("page", "1"),
                ("num", PAGE_SIZE),
                ("web", "1"),
                ("channel", "dubox"),
                ("app_id", "250528"),
                ("jsToken", ""),
            ])
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en-US,en;q=0.9")
            // The remote rejects lookups without a plausible referrer.
            .header("Referer", &link.raw_url)
            .send()
            .await?
            .error_for_status()?;

        let listing: ShareListResponse = response.json().await?;

        if listing.errno != 0 {
            let message = listing
                .errmsg
                .unwrap_or_else(|| "Unknown error from TeraBox API".to_string());
            error!("TeraBox API error: {}", message);
            return Err(RelayError::RemoteApi {
                errno: listing.errno,
                message,
            });
        }

        if listing.list.is_empty() {
            return Err(RelayError::EmptyShare);
        }

        Ok(listing)
    }
}

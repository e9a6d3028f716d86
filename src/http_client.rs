use reqwest::Client;
use std::time::Duration;

/// Directory listings are small pages; anything past this is not a listing.
const MAX_LISTING_BYTES: usize = 8 * 1024 * 1024;

/// HTTP client for fetching directory-listing pages as HTML text.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("docshelf/0.1")
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a listing page body. Rejects non-success statuses, non-HTML
    /// content types and oversized responses.
    pub async fn fetch_listing(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        if let Some(content_type) = response.headers().get("content-type") {
            let content_type_str = content_type.to_str().unwrap_or("");
            if !content_type_str.contains("text/html") {
                return Err(FetchError::NotHtml(content_type_str.to_string()));
            }
        }

        if let Some(content_length) = response.content_length() {
            if content_length > MAX_LISTING_BYTES as u64 {
                return Err(FetchError::TooLarge(content_length));
            }
        }

        let body = response.text().await?;
        if body.len() > MAX_LISTING_BYTES {
            return Err(FetchError::TooLarge(body.len() as u64));
        }

        Ok(body)
    }
}

#[derive(Debug)]
pub enum FetchError {
    HttpStatus(u16),
    NotHtml(String),
    TooLarge(u64),
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::HttpStatus(code) => write!(f, "HTTP status {}", code),
            FetchError::NotHtml(ct) => write!(f, "not an HTML response: {}", ct),
            FetchError::TooLarge(size) => write!(f, "listing too large: {} bytes", size),
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

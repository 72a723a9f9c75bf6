mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Where the pipeline gets its feed text from.
pub trait FeedSource {
    fn load(&self, source: &str) -> Result<String>;
}

/// True for sources with an `http://` or `https://` scheme.
pub fn is_http_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Issues a blocking GET and returns the body text.
///
/// Non-success statuses are errors.
pub fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client
        .execute(req)
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()?;
    debug!(status = %resp.status(), "Feed response received");

    Ok(resp.text()?)
}

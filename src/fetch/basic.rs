use super::client::HttpClient;
use super::{FeedSource, fetch_text, is_http_url};
use anyhow::{Context, Result};

pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::blocking::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for BasicClient {
    fn execute(
        &self,
        req: reqwest::blocking::Request,
    ) -> reqwest::Result<reqwest::blocking::Response> {
        self.0.execute(req)
    }
}

/// `http://` and `https://` sources are fetched, anything else is read
/// from disk.
impl FeedSource for BasicClient {
    fn load(&self, source: &str) -> Result<String> {
        if is_http_url(source) {
            fetch_text(self, source)
        } else {
            std::fs::read_to_string(source)
                .with_context(|| format!("failed to read feed file {source}"))
        }
    }
}

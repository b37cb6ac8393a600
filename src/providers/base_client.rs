use crate::core::error::TmapError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Thin wrapper over `reqwest::Client` shared by the geocoding and routing clients.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        timeout: Duration,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Self, TmapError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TmapError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: extra_headers.unwrap_or_default(),
        })
    }

    pub fn add_header(&mut self, key: &str, value: String) {
        self.headers.insert(key.to_string(), value);
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, TmapError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(&url).query(query);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        Ok(request.send().await?)
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, TmapError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        Ok(request.json(payload).send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client =
            HttpClient::new("http://localhost:1234/".to_string(), Duration::from_secs(1), None)
                .unwrap();
        assert_eq!(client.url("/search"), "http://localhost:1234/search");
        assert_eq!(client.url("v2/directions"), "http://localhost:1234/v2/directions");
    }
}

pub mod upbit_rest_client;

pub use upbit_rest_client::*;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::domain::{
    errors::{AppError, NetworkResult},
    logging::{LogComponent, LogLevel, get_logger},
};

/// JSON-over-HTTP client on top of gloo for WASM
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl GlooHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self { base_url: base_url.into(), default_headers }
    }

    /// Absolute URL for `endpoint`; absolute endpoints pass through.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
        }
    }

    /// GET `endpoint` and decode the JSON body.
    pub async fn get_json<T>(&self, endpoint: &str) -> NetworkResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(endpoint);
        crate::log_debug!(LogComponent::Infrastructure("HTTP"), "🌐 GET JSON: {url}");

        let mut request = Request::get(&url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        if !response.ok() {
            let status = format!("HTTP error: {} - {}", response.status(), response.status_text());
            get_logger().log_with_metadata(LogLevel::Error, LogComponent::Infrastructure("HTTP"), &status, &url);
            return Err(AppError::Network(format!("{status} ({url})")));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

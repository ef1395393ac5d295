//! Shared HTTP client for the user service.
//!
//! Every request goes through one [`ApiClient`], which owns the base URL and a
//! pooled `reqwest::Client`. Responses are read fully into a [`Response`] so that
//! command futures only hold `Send` data.

use gove_states::State;
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use ustr::Ustr;

use crate::{ApiError, ApiResult, BusinessConfig};

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Turns a non-2xx response into [`ApiError::Status`].
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// A request under construction; created by [`ApiClient`].
#[derive(Debug)]
pub struct RequestBuilder {
    http: reqwest::Client,
    method: Method,
    url: String,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> ApiResult<Self> {
        let body = serde_json::to_vec(value).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send(self) -> ApiResult<Response> {
        let Self {
            http,
            method,
            url,
            query,
            body,
        } = self;

        debug!("{} {url} {query:?}", method.as_str());

        let request = match method {
            Method::Get => http.get(&url),
            Method::Post => http.post(&url),
            Method::Put => http.put(&url),
            Method::Delete => http.delete(&url),
        };
        let mut request = request
            .header("content-type", "application/json")
            .header("accept", "application/json");
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        if !(200..300).contains(&status) {
            warn!("{} {url} returned status {status}", method.as_str());
        }

        Ok(Response { status, body })
    }
}

/// The one HTTP client of the application, stored as a state so commands
/// receive it in their snapshot.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Ustr,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: Ustr::from(base_url.as_ref().trim_end_matches('/')),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &BusinessConfig) -> Self {
        Self::new(config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        RequestBuilder {
            http: self.http.clone(),
            method,
            url: self.url(path),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::Put, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::Delete, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config(&BusinessConfig::default())
    }
}

impl State for ApiClient {
    fn snapshot(&self) -> Option<Box<dyn State>> {
        Some(Box::new(self.clone()))
    }
}

use reqwest::StatusCode;
use std::{error::Error, time::Duration};

use crate::config::Config;

/// Status and body of a completed request. HEAD responses carry no body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to build http client: {0}")]
    Client(String),
}

/// Blocking HTTP capability used by the thumbnail fetchers.
///
/// One call is one attempt; implementations must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;

    /// Status only, for existence checks.
    fn head(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

fn get_error(error: &reqwest::Error) -> String {
    match error.source() {
        Some(e) => match e.source() {
            Some(e) => e.to_string(),
            None => e.to_string(),
        },
        None => error.to_string(),
    }
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| FetchError::Client(get_error(&err)))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            Duration::from_secs(config.http_timeout_secs),
            &config.user_agent,
        )
    }
}

impl ReqwestTransport {
    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::blocking::Response, FetchError> {
        let resp = request.send().map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    message: get_error(&err),
                }
            }
        })?;

        if !resp.status().is_success() {
            log::debug!("{url}: {}", resp.status());
        }

        Ok(resp)
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        log::debug!("{url}: requesting");

        let resp = self.send(self.client.get(url), url)?;
        let status = resp.status();

        // we might get a status, but no body.
        let body = match resp.bytes() {
            Ok(b) => b.to_vec(),
            Err(err) => {
                log::debug!("{url}: body read failed: {}", get_error(&err));
                Vec::new()
            }
        };

        Ok(HttpResponse { status, body })
    }

    fn head(&self, url: &str) -> Result<HttpResponse, FetchError> {
        log::debug!("{url}: checking");

        let resp = self.send(self.client.head(url), url)?;

        Ok(HttpResponse::new(resp.status(), Vec::new()))
    }
}

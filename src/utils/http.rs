// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Status and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with [`AppError::Status`] unless the status is 2xx.
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::status(url, self.status))
        }
    }
}

/// Anything that can perform a blocking GET with a per-request deadline.
///
/// Transport failures (including timeouts) are errors; any HTTP status,
/// successful or not, is a response.
pub trait PageFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<FetchedResponse>;
}

/// Blocking `reqwest` client.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a configured blocking HTTP client.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(
                config.page_timeout_secs.max(config.image_timeout_secs),
            ))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<FetchedResponse> {
        log::debug!("GET {} (timeout {}s)", url, timeout.as_secs());
        let response = self.client.get(url).timeout(timeout).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(FetchedResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher for tests.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{FetchedResponse, PageFetcher};
    use crate::error::{AppError, Result};

    /// Serves canned responses and records every requested URL in order.
    /// URLs without a canned response fail like a refused connection.
    #[derive(Default)]
    pub struct FakeFetcher {
        responses: HashMap<String, (u16, Vec<u8>)>,
        pub requests: RefCell<Vec<(String, Duration)>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.to_string(), (status, body.into()));
            self
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests
                .borrow()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }
    }

    impl PageFetcher for FakeFetcher {
        fn get(&self, url: &str, timeout: Duration) -> Result<FetchedResponse> {
            self.requests.borrow_mut().push((url.to_string(), timeout));
            match self.responses.get(url) {
                Some((status, body)) => Ok(FetchedResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("no route to {url}"),
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        let ok = FetchedResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.error_for_status("http://x").is_ok());

        let missing = FetchedResponse {
            status: 404,
            body: b"not found".to_vec(),
        };
        assert!(matches!(
            missing.error_for_status("http://x"),
            Err(AppError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_text_is_lossy() {
        let response = FetchedResponse {
            status: 200,
            body: vec![b'h', b'i', 0xff],
        };
        assert_eq!(response.text(), "hi\u{fffd}");
    }

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(HttpClient::new(&HttpConfig::default()).is_ok());
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::error::InfrastructureError;
use crate::config::HttpConfig;

/// Body of a successful (2xx) GET together with the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub final_url: String,
    pub body: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
pub trait HttpClient {
    /// GET following redirects. Non-2xx responses are `NetworkError`s.
    fn get(&self, url: &str) -> Result<HttpResponse, InfrastructureError>;
}

/// Blocking reqwest client carrying the User-Agent Wikimedia asks bots to send.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, InfrastructureError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.bytes()?.to_vec();
        log::debug!("{} -> {} ({} bytes)", url, final_url, body.len());
        Ok(HttpResponse { final_url, body })
    }
}

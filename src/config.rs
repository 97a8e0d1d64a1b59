use crate::api::ShareClient;
use crate::error::{Error, Result};
use crate::share::ResolvedEndpoint;

#[derive(Clone, Debug)]
pub struct Config {
    pub share_url: String,
    pub password: Option<String>,
    endpoint: ResolvedEndpoint,
}

impl Config {
    /// Creates a new Config instance with the provided parameters.
    ///
    /// An empty password is treated as no password.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `share_url` is empty
    /// - `share_url` is not a valid public share link
    pub fn new(share_url: String, password: Option<String>) -> Result<Self> {
        if share_url.trim().is_empty() {
            return Err(Error::ConfigError("Share URL cannot be empty".to_string()));
        }

        let endpoint = ResolvedEndpoint::resolve(share_url.trim())?;

        Ok(Self {
            share_url,
            password: password.filter(|p| !p.is_empty()),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    /// Client for the configured share over HTTP
    #[must_use]
    pub fn client(&self) -> ShareClient {
        ShareClient::new(self.endpoint.clone(), self.password.clone())
    }
}

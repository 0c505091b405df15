//! Client configuration and credentials

use std::fmt;

use crate::error::{Error, Result};

/// API token sent as the `Authorization` header of every request
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(****)")
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// monday endpoints and credentials
#[derive(Debug, Clone)]
pub struct MondayConfig {
    pub api_url: String,
    pub file_url: String,
    pub api_token: ApiToken,
}

impl MondayConfig {
    /// Default GraphQL endpoint
    pub const DEFAULT_API_URL: &'static str = "https://api.monday.com/v2/";
    /// Default GraphQL endpoint for multipart file uploads
    pub const DEFAULT_FILE_URL: &'static str = "https://api.monday.com/v2/file";

    /// Configuration for the default endpoints.
    pub fn new(api_token: impl Into<ApiToken>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            file_url: Self::DEFAULT_FILE_URL.to_string(),
            api_token: api_token.into(),
        }
    }

    /// Reads the token from `MONDAY_API_TOKEN`.
    ///
    /// `MONDAY_API_URL` and `MONDAY_FILE_URL` replace the default endpoints when set.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("MONDAY_API_TOKEN")
            .map_err(|_| Error::Config("MONDAY_API_TOKEN is not set".into()))?;

        Ok(Self::new(token).with_overrides(
            std::env::var("MONDAY_API_URL").ok(),
            std::env::var("MONDAY_FILE_URL").ok(),
            None,
        ))
    }

    /// Replaces each setting that has a value; `None` keeps the current one.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        file_url: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(url) = file_url {
            self.file_url = url;
        }
        if let Some(token) = api_token {
            self.api_token = ApiToken::new(token);
        }
        self
    }
}

//! Environment configuration
//!
//! Resolved once per run and handed to every component by reference.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Public Restful Booker instance used when `BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://restful-booker.herokuapp.com";

/// Default admin username accepted by the public instance
pub const DEFAULT_USERNAME: &str = "admin";

/// Default admin password accepted by the public instance
pub const DEFAULT_PASSWORD: &str = "password123";

/// Harness configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Env {
    /// Base URL of the booking service
    pub base_url: String,

    /// Username for `POST /auth`
    pub username: String,

    /// Password for `POST /auth`
    pub password: String,

    /// Running under CI (`CI=true` or `GITHUB_ACTIONS` set)
    pub ci: bool,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            ci: false,
        }
    }
}

impl Env {
    /// Load configuration from a `.env` file (if present) and the process environment
    pub fn load() -> Result<Self> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let ci = lookup("CI")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
            || lookup("GITHUB_ACTIONS").map(|v| !v.is_empty()).unwrap_or(false);

        let env = Self {
            base_url: value("BASE_URL", DEFAULT_BASE_URL),
            username: value("USERNAME", DEFAULT_USERNAME),
            password: value("PASSWORD", DEFAULT_PASSWORD),
            ci,
        };
        env.validate()?;
        Ok(env)
    }

    fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidConfig(format!("BASE_URL {:?}: {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::InvalidConfig(format!(
                "BASE_URL must use http or https, got {}",
                other
            ))),
        }
    }
}

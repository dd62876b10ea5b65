//! Per-test dependency graph
//!
//! `Env -> ApiClient -> {AuthApi, BookingApi, HealthApi} -> token`.
//! Every link is built on first use and lives only as long as the
//! [`Fixtures`] value; create one per test.

use once_cell::sync::OnceCell;
use tokio::sync::OnceCell as AsyncOnceCell;
use tracing::debug;

use crate::api::{AuthApi, AuthTokenResponse, BookingApi, HealthApi};
use crate::assertions::expect_ok;
use crate::client::ApiClient;
use crate::config::Env;
use crate::error::{Error, Result};

pub struct Fixtures {
    env: Env,
    api_client: OnceCell<ApiClient>,
    auth_api: OnceCell<AuthApi>,
    booking_api: OnceCell<BookingApi>,
    health_api: OnceCell<HealthApi>,
    token: AsyncOnceCell<String>,
}

impl Fixtures {
    pub fn new(env: Env) -> Self {
        Self {
            env,
            api_client: OnceCell::new(),
            auth_api: OnceCell::new(),
            booking_api: OnceCell::new(),
            health_api: OnceCell::new(),
            token: AsyncOnceCell::new(),
        }
    }

    /// Fixtures over the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Env::load()?))
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// HTTP client bound to the configured base URL
    pub fn api_client(&self) -> Result<&ApiClient> {
        self.api_client
            .get_or_try_init(|| ApiClient::new(self.env.base_url.clone()))
    }

    pub fn auth_api(&self) -> Result<&AuthApi> {
        let client = self.api_client()?;
        Ok(self.auth_api.get_or_init(|| AuthApi::new(client.clone())))
    }

    pub fn booking_api(&self) -> Result<&BookingApi> {
        let client = self.api_client()?;
        Ok(self.booking_api.get_or_init(|| BookingApi::new(client.clone())))
    }

    pub fn health_api(&self) -> Result<&HealthApi> {
        let client = self.api_client()?;
        Ok(self.health_api.get_or_init(|| HealthApi::new(client.clone())))
    }

    /// Token for the configured credentials.
    ///
    /// Requested once per `Fixtures`; a non-ok reply or a reply without a
    /// token fails immediately.
    pub async fn token(&self) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let resp = self
                    .auth_api()?
                    .create_token(&self.env.username, &self.env.password)
                    .await?;
                expect_ok(&resp)?;

                let token = resp
                    .json::<AuthTokenResponse>()
                    .and_then(|body| body.token)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| Error::TokenMissing {
                        status: resp.status,
                        body: resp.body_text.clone(),
                    })?;

                debug!(username = %self.env.username, "obtained auth token");
                Ok::<_, Error>(token)
            })
            .await?;
        Ok(token.as_str())
    }
}

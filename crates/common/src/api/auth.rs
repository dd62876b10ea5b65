//! `POST /auth`

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::Result;

/// Body of a `POST /auth` reply. Bad credentials yield `{"reason": ...}`, so
/// the token is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Request a token for the given credentials
    pub async fn create_token(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let options = RequestOptions::new()
            .json_headers()
            .data(json!({ "username": username, "password": password }));
        self.client.post("/auth", options).await
    }
}

//! `GET /ping`

use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::Result;

/// Health check endpoint. A healthy service answers 201 with `Created`.
#[derive(Debug, Clone)]
pub struct HealthApi {
    client: ApiClient,
}

impl HealthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn ping(&self) -> Result<ApiResponse> {
        self.client.get("/ping", RequestOptions::new()).await
    }
}

//! `/booking` resource

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::Result;

/// Check-in and check-out dates as `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    pub checkin: String,
    pub checkout: String,
}

/// A booking as exchanged with the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// Partial booking for `PATCH`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalprice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depositpaid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookingdates: Option<BookingDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// Reply to `POST /booking`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub bookingid: u64,
    pub booking: Booking,
}

/// Item of the `GET /booking` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingId {
    pub bookingid: u64,
}

/// Query filters for `GET /booking`. Unset filters are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingApi {
    client: ApiClient,
}

impl BookingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List booking ids, optionally filtered
    pub async fn get_all(&self, filter: Option<&BookingFilter>) -> Result<ApiResponse> {
        let mut options = RequestOptions::new();
        if let Some(filter) = filter {
            options = options.query_object(serde_json::to_value(filter)?);
        }
        self.client.get("/booking", options).await
    }

    pub async fn get_by_id(&self, booking_id: u64) -> Result<ApiResponse> {
        let options = RequestOptions::new().header("Accept", "application/json");
        self.client
            .get(&format!("/booking/{}", booking_id), options)
            .await
    }

    pub async fn create(&self, booking: &Booking) -> Result<ApiResponse> {
        let options = RequestOptions::new()
            .json_headers()
            .data(serde_json::to_value(booking)?);
        self.client.post("/booking", options).await
    }

    /// Replace a booking. Requires a token.
    pub async fn update(&self, booking_id: u64, booking: &Booking, token: &str) -> Result<ApiResponse> {
        let options = RequestOptions::new()
            .json_headers()
            .data(serde_json::to_value(booking)?)
            .cookie_token(token);
        self.client
            .put(&format!("/booking/{}", booking_id), options)
            .await
    }

    /// Update selected fields of a booking. Requires a token.
    pub async fn partial_update(
        &self,
        booking_id: u64,
        patch: &BookingPatch,
        token: &str,
    ) -> Result<ApiResponse> {
        let options = RequestOptions::new()
            .json_headers()
            .data(serde_json::to_value(patch)?)
            .cookie_token(token);
        self.client
            .patch(&format!("/booking/{}", booking_id), options)
            .await
    }

    /// Delete a booking. Requires a token; the service answers 201.
    pub async fn delete(&self, booking_id: u64, token: &str) -> Result<ApiResponse> {
        let options = RequestOptions::new().cookie_token(token);
        self.client
            .delete(&format!("/booking/{}", booking_id), options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn sample() -> Booking {
        Booking {
            firstname: "Jim".to_string(),
            lastname: "Brown".to_string(),
            totalprice: 111,
            depositpaid: true,
            bookingdates: BookingDates {
                checkin: "2018-01-01".to_string(),
                checkout: "2019-01-01".to_string(),
            },
            additionalneeds: None,
        }
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = BookingPatch {
            additionalneeds: Some("Late Checkout".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"additionalneeds": "Late Checkout"})
        );
    }

    #[tokio::test]
    async fn test_get_all_passes_filters_through() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/booking")
                    .query_param("firstname", "Jim")
                    .query_param("checkin", "2018-01-01");
                then.status(200).json_body(json!([{"bookingid": 1}, {"bookingid": 2}]));
            })
            .await;

        let api = BookingApi::new(ApiClient::new(server.base_url()).unwrap());
        let filter = BookingFilter {
            firstname: Some("Jim".to_string()),
            checkin: Some("2018-01-01".to_string()),
            ..Default::default()
        };
        let resp = api.get_all(Some(&filter)).await.unwrap();

        mock.assert_async().await;
        let ids: Vec<BookingId> = resp.json().unwrap();
        assert_eq!(ids, vec![BookingId { bookingid: 1 }, BookingId { bookingid: 2 }]);
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let server = MockServer::start_async().await;
        let booking = sample();
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/booking")
                    .header("content-type", "application/json")
                    .json_body(serde_json::to_value(sample()).unwrap());
                then.status(200)
                    .json_body(json!({"bookingid": 42, "booking": sample()}));
            })
            .await;
        let get = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/booking/42")
                    .header("accept", "application/json");
                then.status(200).json_body(serde_json::to_value(sample()).unwrap());
            })
            .await;

        let api = BookingApi::new(ApiClient::new(server.base_url()).unwrap());
        let created: CreateBookingResponse = api.create(&booking).await.unwrap().json().unwrap();
        let fetched: Booking = api.get_by_id(created.bookingid).await.unwrap().json().unwrap();

        create.assert_async().await;
        get.assert_async().await;
        assert_eq!(created.bookingid, 42);
        assert_eq!(fetched.firstname, booking.firstname);
    }

    #[tokio::test]
    async fn test_mutations_carry_token_cookie() {
        let server = MockServer::start_async().await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT).path("/booking/5").header("cookie", "token=tok");
                then.status(200).json_body(serde_json::to_value(sample()).unwrap());
            })
            .await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/booking/5")
                    .header("cookie", "token=tok")
                    .json_body(json!({"firstname": "James"}));
                then.status(200).json_body(serde_json::to_value(sample()).unwrap());
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/booking/5").header("cookie", "token=tok");
                then.status(201).header("content-type", "text/plain").body("Created");
            })
            .await;

        let api = BookingApi::new(ApiClient::new(server.base_url()).unwrap());
        api.update(5, &sample(), "tok").await.unwrap();
        let changes = BookingPatch {
            firstname: Some("James".to_string()),
            ..Default::default()
        };
        api.partial_update(5, &changes, "tok").await.unwrap();
        let resp = api.delete(5, "tok").await.unwrap();

        put.assert_async().await;
        patch.assert_async().await;
        delete.assert_async().await;
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body_text, "Created");
    }
}

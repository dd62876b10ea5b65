//! Scenario bodies
//!
//! Each scenario takes its own [`Fixtures`] and fails with the first
//! unmet expectation.

use std::fmt::Debug;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use booker_common::{
    booking_factory, expect_json, expect_ok, expect_status, AuthTokenResponse, Booking,
    BookingApi, BookingFilter, BookingId, BookingOverrides, BookingPatch, CreateBookingResponse, Error,
    Fixtures, Result,
};

fn check_eq<T: PartialEq + Debug>(what: &str, actual: &T, expected: &T) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    Err(Error::Assertion(format!(
        "{}: expected {:?} but got {:?}",
        what, expected, actual
    )))
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Assertion(message()))
    }
}

/// `GET /ping` answers 201 with the literal body `Created`
pub fn ping_returns_created(fx: &Fixtures) -> BoxFuture<'_, Result<()>> {
    async move {
        let resp = fx.health_api()?.ping().await?;
        expect_status(&resp, 201)?;
        check_eq("ping body", &resp.body_text.trim(), &"Created")
    }
    .boxed()
}

/// Valid credentials yield a non-empty token
pub fn auth_returns_token(fx: &Fixtures) -> BoxFuture<'_, Result<()>> {
    async move {
        let env = fx.env();
        let resp = fx
            .auth_api()?
            .create_token(&env.username, &env.password)
            .await?;
        expect_ok(&resp)?;

        let body: AuthTokenResponse = expect_json(&resp)?;
        check(body.token.is_some_and(|t| !t.is_empty()), || {
            format!("expected a token, got body {}", resp.body_text)
        })
    }
    .boxed()
}

/// A wrong password yields no token
pub fn auth_wrong_password_returns_no_token(fx: &Fixtures) -> BoxFuture<'_, Result<()>> {
    async move {
        let env = fx.env();
        let password = format!("{}_wrong", env.password);
        let resp = fx.auth_api()?.create_token(&env.username, &password).await?;

        let token = resp
            .json::<AuthTokenResponse>()
            .and_then(|body| body.token)
            .filter(|t| !t.is_empty());
        check(token.is_none(), || {
            format!("expected no token for a wrong password, got {:?}", token)
        })
    }
    .boxed()
}

/// Best-effort delete of a booking left behind by a failed scenario
async fn discard_booking(api: &BookingApi, booking_id: u64, token: &str) {
    match api.delete(booking_id, token).await {
        Ok(resp) => debug!(booking_id, status = resp.status, "discarded booking"),
        Err(e) => warn!(booking_id, "failed to discard booking: {}", e),
    }
}

/// Create -> Get -> Update -> Patch -> Delete -> Get (404)
pub fn booking_lifecycle(fx: &Fixtures) -> BoxFuture<'_, Result<()>> {
    async move {
        let api = fx.booking_api()?;
        let token = fx.token().await?;
        let booking = booking_factory(BookingOverrides::default());

        let create = api.create(&booking).await?;
        expect_ok(&create)?;
        let created: CreateBookingResponse = expect_json(&create)?;
        let id = created.bookingid;
        info!(booking_id = id, "created booking");

        let outcome = lifecycle_steps(api, id, &booking, token).await;
        if outcome.is_err() {
            discard_booking(api, id, token).await;
        }
        outcome
    }
    .boxed()
}

async fn lifecycle_steps(api: &BookingApi, id: u64, booking: &Booking, token: &str) -> Result<()> {
    let fetched = api.get_by_id(id).await?;
    expect_ok(&fetched)?;
    let fetched: Booking = expect_json(&fetched)?;
    check_eq("firstname after create", &fetched.firstname, &booking.firstname)?;

    let updated = booking_factory(BookingOverrides {
        firstname: Some(format!("{}_Updated", booking.firstname)),
        ..Default::default()
    });
    let put = api.update(id, &updated, token).await?;
    expect_ok(&put)?;
    let put: Booking = expect_json(&put)?;
    check_eq("firstname after update", &put.firstname, &updated.firstname)?;

    let changes = BookingPatch {
        additionalneeds: Some("Late Checkout".to_string()),
        ..Default::default()
    };
    let patched = api.partial_update(id, &changes, token).await?;
    expect_ok(&patched)?;
    let patched: Booking = expect_json(&patched)?;
    check_eq(
        "additionalneeds after patch",
        &patched.additionalneeds.as_deref(),
        &Some("Late Checkout"),
    )?;

    let deleted = api.delete(id, token).await?;
    expect_status(&deleted, 201)?;

    let gone = api.get_by_id(id).await?;
    expect_status(&gone, 404)
}

/// A new booking is listed when filtering by its names
pub fn booking_list_filters(fx: &Fixtures) -> BoxFuture<'_, Result<()>> {
    async move {
        let api = fx.booking_api()?;
        let booking = booking_factory(BookingOverrides::default());

        let create = api.create(&booking).await?;
        expect_ok(&create)?;
        let created: CreateBookingResponse = expect_json(&create)?;
        let id = created.bookingid;

        let outcome = listed_by_name(api, id, &booking).await;

        // Leave nothing behind on the shared service, whatever the outcome.
        let token = fx.token().await?;
        let deleted = api.delete(id, token).await;
        outcome?;
        expect_status(&deleted?, 201)
    }
    .boxed()
}

async fn listed_by_name(api: &BookingApi, id: u64, booking: &Booking) -> Result<()> {
    let filter = BookingFilter {
        firstname: Some(booking.firstname.clone()),
        lastname: Some(booking.lastname.clone()),
        ..Default::default()
    };
    let list = api.get_all(Some(&filter)).await?;
    expect_ok(&list)?;
    let ids: Vec<BookingId> = expect_json(&list)?;

    check(ids.iter().any(|b| b.bookingid == id), || {
        format!("booking {} missing from filtered list {:?}", id, ids)
    })
}

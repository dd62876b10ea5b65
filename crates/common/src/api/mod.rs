//! Domain API clients
//!
//! Each method maps one domain operation onto exactly one [`ApiClient`] call.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod auth;
pub mod booking;
pub mod health;

pub use auth::{AuthApi, AuthTokenResponse};
pub use booking::{
    Booking, BookingApi, BookingDates, BookingFilter, BookingId, BookingPatch,
    CreateBookingResponse,
};
pub use health::HealthApi;

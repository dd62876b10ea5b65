//! Booker Common Library
//!
//! HTTP plumbing and test building blocks for exercising the Restful
//! Booker API end to end:
//!
//! - [`config`]: environment configuration
//! - [`client`]: HTTP client producing normalized [`ApiResponse`] envelopes
//! - [`api`]: auth, booking and health clients
//! - [`assertions`]: envelope checks with diagnostic messages
//! - [`factory`]: randomized booking payloads
//! - [`fixtures`]: per-test dependency graph

pub mod api;
pub mod assertions;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod fixtures;

// Re-export commonly used types
pub use api::{
    AuthApi, AuthTokenResponse, Booking, BookingApi, BookingDates, BookingFilter, BookingId,
    BookingPatch, CreateBookingResponse, HealthApi,
};
pub use assertions::{expect_duration_under, expect_json, expect_ok, expect_status};
pub use client::{ApiClient, ApiResponse, RequestOptions, SniffedBody};
pub use config::Env;
pub use error::{Error, Result};
pub use factory::{booking_factory, BookingOverrides};
pub use fixtures::Fixtures;

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

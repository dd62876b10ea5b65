//! Randomized test data

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::api::{Booking, BookingDates};

/// Fields to force on a generated booking; `None` keeps the generated value
#[derive(Debug, Clone, Default)]
pub struct BookingOverrides {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub totalprice: Option<i64>,
    pub depositpaid: Option<bool>,
    pub bookingdates: Option<BookingDates>,
    pub additionalneeds: Option<String>,
}

/// Generate a valid booking with a random name suffix and price
pub fn booking_factory(overrides: BookingOverrides) -> Booking {
    let id = rand::thread_rng().gen_range(0..999_999);
    build_booking(id, Utc::now(), overrides)
}

fn build_booking(id: u32, now: DateTime<Utc>, overrides: BookingOverrides) -> Booking {
    let fmt = |d: DateTime<Utc>| d.format("%Y-%m-%d").to_string();

    Booking {
        firstname: overrides.firstname.unwrap_or_else(|| format!("John{}", id)),
        lastname: overrides.lastname.unwrap_or_else(|| format!("Doe{}", id)),
        totalprice: overrides.totalprice.unwrap_or(100 + i64::from(id % 300)),
        depositpaid: overrides.depositpaid.unwrap_or(true),
        bookingdates: overrides.bookingdates.unwrap_or_else(|| BookingDates {
            checkin: fmt(now + Duration::days(1)),
            checkout: fmt(now + Duration::days(3)),
        }),
        additionalneeds: Some(
            overrides
                .additionalneeds
                .unwrap_or_else(|| "Breakfast".to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap();
        let booking = build_booking(1234, now, BookingOverrides::default());

        assert_eq!(booking.firstname, "John1234");
        assert_eq!(booking.lastname, "Doe1234");
        assert_eq!(booking.totalprice, 100 + 1234 % 300);
        assert!(booking.depositpaid);
        assert_eq!(booking.bookingdates.checkin, "2024-02-29");
        assert_eq!(booking.bookingdates.checkout, "2024-03-02");
        assert_eq!(booking.additionalneeds.as_deref(), Some("Breakfast"));
    }

    #[test]
    fn test_overrides_win() {
        let booking = booking_factory(BookingOverrides {
            firstname: Some("Ada".to_string()),
            totalprice: Some(5),
            depositpaid: Some(false),
            additionalneeds: Some("Late Checkout".to_string()),
            ..Default::default()
        });

        assert_eq!(booking.firstname, "Ada");
        assert!(booking.lastname.starts_with("Doe"));
        assert_eq!(booking.totalprice, 5);
        assert!(!booking.depositpaid);
        assert_eq!(booking.additionalneeds.as_deref(), Some("Late Checkout"));
    }

    #[test]
    fn test_price_range() {
        for _ in 0..200 {
            let booking = booking_factory(BookingOverrides::default());
            assert!((100..400).contains(&booking.totalprice));
            let suffix: u32 = booking.firstname["John".len()..].parse().unwrap();
            assert_eq!(booking.lastname, format!("Doe{}", suffix));
        }
    }
}

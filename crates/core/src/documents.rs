//! Document expiry window and reminder text.

use chrono::NaiveDate;

/// Documents expiring within this many days get a reminder.
pub const EXPIRY_WINDOW_DAYS: i64 = 15;

/// Whole days from `today` until `expiry` (negative when already expired).
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Whether a document falls inside the reminder window.
pub fn within_window(expiry: NaiveDate, today: NaiveDate) -> bool {
    days_until(expiry, today) <= EXPIRY_WINDOW_DAYS
}

/// Reminder body shown in the notification feed.
pub fn reminder_message(
    document_type: &str,
    make: &str,
    model: &str,
    registration_number: &str,
    days_left: i64,
) -> String {
    if days_left < 0 {
        format!(
            "Your {document_type} for {make} {model} ({registration_number}) expired {} days ago.",
            -days_left
        )
    } else {
        format!(
            "Your {document_type} for {make} {model} ({registration_number}) will expire in {days_left} days."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn window_includes_boundary_day() {
        let today = day("2026-08-07");
        assert!(within_window(day("2026-08-22"), today));
        assert!(!within_window(day("2026-08-23"), today));
    }

    #[test]
    fn already_expired_is_within_window() {
        let today = day("2026-08-07");
        assert!(within_window(day("2026-08-01"), today));
        assert_eq!(days_until(day("2026-08-01"), today), -6);
    }

    #[test]
    fn reminder_message_mentions_vehicle_and_days() {
        let msg = reminder_message("Insurance", "Honda", "City", "MH12AB1234", 10);
        assert!(msg.contains("Insurance"));
        assert!(msg.contains("MH12AB1234"));
        assert!(msg.contains("10 days"));
    }

    #[test]
    fn expired_message_counts_backwards() {
        let msg = reminder_message("PUC", "Honda", "City", "MH12AB1234", -3);
        assert!(msg.contains("expired 3 days ago"));
    }
}

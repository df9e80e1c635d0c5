//! Resolves the configured timezone for date bucketing.
//!
//! All month boundaries are computed from the calendar date in the server's
//! configured timezone (UTC unless configured otherwise), never the ambient
//! runtime timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Look up the current UTC offset of the timezone `canonical_timezone`, or
/// `None` if the name is not a canonical timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's calendar date in the timezone `canonical_timezone`
/// (e.g., "Pacific/Auckland").
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// valid canonical timezone string.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_string()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod timezone_tests {
    use crate::Error;

    use super::local_today;

    #[test]
    fn utc_resolves_to_a_date() {
        assert!(local_today("UTC").is_ok());
    }

    #[test]
    fn invalid_timezone_returns_error() {
        let result = local_today("Middle/Earth");

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Middle/Earth".to_string()))
        );
    }
}

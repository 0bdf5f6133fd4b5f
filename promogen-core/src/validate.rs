//! Input validation for event fields.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{PromoError, PromoResult};
use crate::slug::is_slug;

/// Time used when none is given.
pub const DEFAULT_TIME: &str = "00:00";

/// Check `YYYY-MM-DD` shape and that the date exists on the calendar.
pub fn validate_date(input: &str) -> PromoResult<String> {
    let date = input.trim();

    let shape_ok = date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shape_ok || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(PromoError::format(format!(
            "Invalid date {date:?}. Use YYYY-MM-DD (e.g. 2026-03-07)."
        )));
    }

    Ok(date.to_string())
}

/// Check `HH:MM` with hour 00-23 and minute 00-59. Blank means midnight.
pub fn validate_time(input: &str) -> PromoResult<String> {
    let time = input.trim();
    if time.is_empty() {
        return Ok(DEFAULT_TIME.to_string());
    }

    let invalid = || PromoError::format(format!("Invalid time {time:?}. Use HH:MM (e.g. 22:00)."));

    let (hh, mm) = time.split_once(':').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hh) || !two_digits(mm) {
        return Err(invalid());
    }

    let hour: u32 = hh.parse().map_err(|_| invalid())?;
    let minute: u32 = mm.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(PromoError::format(format!(
            "Invalid time {time:?}: hour must be 00-23 and minute 00-59."
        )));
    }

    Ok(time.to_string())
}

pub fn validate_title(input: &str) -> PromoResult<String> {
    let title = input.trim();
    if title.is_empty() {
        return Err(PromoError::format("Event title is required."));
    }
    Ok(title.to_string())
}

pub fn validate_ticket_url(input: &str) -> PromoResult<String> {
    let url = input.trim();
    if url.is_empty() {
        return Err(PromoError::format("Ticket URL is required."));
    }
    Ok(url.to_string())
}

/// A user-supplied slug must already be in canonical slug form.
pub fn validate_slug(input: &str) -> PromoResult<String> {
    let slug = input.trim();
    if !is_slug(slug) {
        return Err(PromoError::format(format!(
            "Invalid slug {slug:?}. Use lowercase letters, digits and single hyphens."
        )));
    }
    Ok(slug.to_string())
}

/// Parse already-validated `HH:MM`.
pub(crate) fn parse_time(time: &str) -> PromoResult<NaiveTime> {
    let time = validate_time(time)?;
    NaiveTime::parse_from_str(&time, "%H:%M")
        .map_err(|e| PromoError::format(format!("Invalid time {time:?}: {e}")))
}

/// Parse already-validated `YYYY-MM-DD`.
pub(crate) fn parse_date(date: &str) -> PromoResult<NaiveDate> {
    let date = validate_date(date)?;
    NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| PromoError::format(format!("Invalid date {date:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_calendar_dates() {
        assert_eq!(validate_date("2026-03-07").unwrap(), "2026-03-07");
        assert_eq!(validate_date(" 2024-02-29 ").unwrap(), "2024-02-29");
    }

    #[test]
    fn date_rejects_wrong_shape() {
        assert!(matches!(validate_date("07-03-2026"), Err(PromoError::Format(_))));
        assert!(validate_date("2026-3-7").is_err());
        assert!(validate_date("2026/03/07").is_err());
        assert!(validate_date("20260307").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn date_rejects_impossible_days() {
        assert!(validate_date("2026-02-30").is_err());
        assert!(validate_date("2025-02-29").is_err());
        assert!(validate_date("2026-13-01").is_err());
        assert!(validate_date("2026-00-10").is_err());
    }

    #[test]
    fn time_blank_defaults_to_midnight() {
        assert_eq!(validate_time("").unwrap(), "00:00");
        assert_eq!(validate_time("   ").unwrap(), "00:00");
    }

    #[test]
    fn time_accepts_valid_clock_times() {
        assert_eq!(validate_time("22:00").unwrap(), "22:00");
        assert_eq!(validate_time("00:00").unwrap(), "00:00");
        assert_eq!(validate_time("23:59").unwrap(), "23:59");
    }

    #[test]
    fn time_rejects_out_of_range() {
        assert!(matches!(validate_time("25:00"), Err(PromoError::Format(_))));
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("12:60").is_err());
    }

    #[test]
    fn time_rejects_wrong_shape() {
        assert!(validate_time("9:00").is_err());
        assert!(validate_time("22").is_err());
        assert!(validate_time("22:00:00").is_err());
        assert!(validate_time("ab:cd").is_err());
        assert!(validate_time("+1:00").is_err());
    }

    #[test]
    fn required_text_fields() {
        assert_eq!(validate_title("  Night Out ").unwrap(), "Night Out");
        assert!(validate_title(" ").is_err());
        assert_eq!(
            validate_ticket_url("https://tickets.example/1").unwrap(),
            "https://tickets.example/1"
        );
        assert!(validate_ticket_url("").is_err());
    }

    #[test]
    fn custom_slugs_must_be_canonical() {
        assert_eq!(validate_slug("spring-rave").unwrap(), "spring-rave");
        assert!(validate_slug("Spring Rave").is_err());
        assert!(validate_slug("-rave").is_err());
    }

    #[test]
    fn parse_helpers() {
        assert_eq!(
            parse_date("2026-03-07").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
        );
        assert_eq!(
            parse_time("").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
    }
}

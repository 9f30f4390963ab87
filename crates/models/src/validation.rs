//! Field-level validation shared by the `New*` / `*Patch` input types.
//!
//! Every helper returns `ModelError::Validation` naming the offending field so
//! callers can render an actionable message.
use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::errors::ModelError;

pub const MAX_PRICE: i32 = 99_999_999;
pub const SMALL_INT: i16 = 32_767;
pub const MAX_SEAT_COUNT: i16 = 999;
pub const STD_STR: usize = 50;
pub const MIN_NAME: usize = 2;
pub const MIN_STORE_TEXT: usize = 3;
pub const FREE_STR: usize = 200;
pub const PHONE: usize = 10;
pub const EMAIL: usize = 100;
pub const AREA_SCALE: u32 = 2;

/// Largest accepted store area, 999.99.
pub fn max_area() -> Decimal {
    Decimal::new(99_999, AREA_SCALE)
}

/// Trim in place, then check the character count.
pub fn check_len(field: &'static str, value: &mut String, min: usize, max: usize) -> Result<(), ModelError> {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
    let n = value.chars().count();
    if n < min || n > max {
        return Err(ModelError::validation(field, format!("length must be between {min} and {max}, got {n}")));
    }
    Ok(())
}

pub fn check_opt_len(field: &'static str, value: &mut Option<String>, min: usize, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) => check_len(field, v, min, max),
        None => Ok(()),
    }
}

pub fn check_max<T: PartialOrd + std::fmt::Display>(field: &'static str, value: T, max: T) -> Result<(), ModelError> {
    if value > max {
        return Err(ModelError::validation(field, format!("must not be greater than {max}")));
    }
    Ok(())
}

pub fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &'static str,
    value: T,
    min: T,
    max: T,
) -> Result<(), ModelError> {
    if value < min {
        return Err(ModelError::validation(field, format!("must not be less than {min}")));
    }
    check_max(field, value, max)
}

pub fn check_price(field: &'static str, value: i32) -> Result<(), ModelError> {
    check_range(field, value, 0, MAX_PRICE)
}

pub fn check_area(value: Decimal) -> Result<(), ModelError> {
    check_range("area", value, Decimal::ZERO, max_area())?;
    if value.normalize().scale() > AREA_SCALE {
        return Err(ModelError::validation("area", "at most 2 decimal places are allowed"));
    }
    Ok(())
}

/// Strip spaces and dashes, then bound the length.
pub fn normalize_phone(value: &mut String) -> Result<(), ModelError> {
    value.retain(|c| c != ' ' && c != '-');
    if value.is_empty() {
        return Err(ModelError::validation("phone_number", "must not be empty"));
    }
    let n = value.chars().count();
    if n > PHONE {
        return Err(ModelError::validation("phone_number", format!("must be at most {PHONE} characters, got {n}")));
    }
    Ok(())
}

/// Parse one `H:MM AM/PM` clock value.
fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    // chrono also takes single-digit minutes
    let (_, rest) = raw.split_once(':')?;
    if !rest.get(..2).is_some_and(|m| m.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%I:%M %p").ok()
}

/// Parse `"H:MM AM/PM - H:MM AM/PM"` into its start and end times.
///
/// The dash must be surrounded by whitespace. Returns `None` for malformed input;
/// ordering is not checked here.
pub fn parse_time_range(value: &str) -> Option<(NaiveTime, NaiveTime)> {
    let idx = value.find('-')?;
    let (start, rest) = value.split_at(idx);
    let end = &rest[1..];
    if !start.ends_with(char::is_whitespace) || !end.starts_with(char::is_whitespace) {
        return None;
    }
    Some((parse_clock(start)?, parse_clock(end)?))
}

/// Business hours must parse and open strictly before they close.
pub fn check_time_range(field: &'static str, value: &mut Option<String>) -> Result<(), ModelError> {
    let Some(v) = value else { return Ok(()) };
    let trimmed = v.trim();
    if trimmed.is_empty() {
        *value = None;
        return Ok(());
    }
    let (start, end) = parse_time_range(trimmed).ok_or_else(|| {
        ModelError::validation(field, "must be in format \"HH:MM AM/PM - HH:MM AM/PM\", e.g. 9:00 AM - 7:00 PM")
    })?;
    if start >= end {
        return Err(ModelError::validation(field, "start time must be before end time"));
    }
    *v = trimmed.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> Result<Option<String>, ModelError> {
        let mut v = Some(s.to_string());
        check_time_range("business_hours_weekdays", &mut v).map(|_| v)
    }

    #[test]
    fn accepts_ordered_business_hours() {
        assert_eq!(range("9:00 AM - 7:00 PM").unwrap().as_deref(), Some("9:00 AM - 7:00 PM"));
        assert!(range("09:30 am - 12:00 PM").is_ok());
        assert!(range("  12:00 AM - 11:59 PM  ").is_ok());
        assert!(range("9:00AM - 7:00PM").is_ok());
    }

    #[test]
    fn rejects_end_before_start() {
        let err = range("7:00 PM - 9:00 AM").unwrap_err();
        assert_eq!(err.field(), "business_hours_weekdays");
        assert!(range("9:00 AM - 9:00 AM").is_err());
        assert!(range("12:30 PM - 12:10 PM").is_err());
    }

    #[test]
    fn rejects_malformed_ranges() {
        for bad in [
            "9 AM - 7 PM",
            "9:00 - 19:00",
            "9:00 AM-7:00 PM",
            "13:00 AM - 2:00 PM",
            "0:30 AM - 2:00 PM",
            "9:60 AM - 10:00 AM",
            "9:00 AM to 7:00 PM",
            "9:5 AM - 10:00 AM",
            "9:00 AM - 7:00 PM extra",
            "9:00 AM - ",
            "abc",
        ] {
            assert!(range(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn empty_range_is_cleared() {
        assert_eq!(range("   ").unwrap(), None);
    }

    #[test]
    fn noon_and_midnight_convert_correctly() {
        let (start, end) = parse_time_range("12:00 AM - 12:00 PM").unwrap();
        assert_eq!(start, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn check_len_trims_and_bounds() {
        let mut name = "  Salon One  ".to_string();
        check_len("name", &mut name, MIN_STORE_TEXT, STD_STR).unwrap();
        assert_eq!(name, "Salon One");

        let mut short = " ab ".to_string();
        let err = check_len("name", &mut short, MIN_STORE_TEXT, STD_STR).unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn area_bounds_and_scale() {
        assert!(check_area(Decimal::new(99_999, 2)).is_ok());
        assert!(check_area(Decimal::new(3005, 1)).is_ok());
        assert!(check_area(Decimal::new(100_000, 2)).is_err());
        assert!(check_area(Decimal::new(-1, 1)).is_err());
        assert!(check_area(Decimal::new(10_001, 3)).is_err());
        // trailing zeros do not count against the scale
        assert!(check_area(Decimal::new(12_000, 3)).is_ok());
    }

    #[test]
    fn phone_is_normalized() {
        let mut phone = "090 123-4567".to_string();
        normalize_phone(&mut phone).unwrap();
        assert_eq!(phone, "0901234567");

        let mut long = "0901 234 5678".to_string();
        assert!(normalize_phone(&mut long).is_err());
    }

    #[test]
    fn price_upper_bound() {
        assert!(check_price("man_price", MAX_PRICE).is_ok());
        assert!(check_price("man_price", MAX_PRICE + 1).is_err());
        assert!(check_price("man_price", -1).is_err());
        assert!(check_range("seat_count", 0i16, 0, MAX_SEAT_COUNT).is_ok());
    }
}

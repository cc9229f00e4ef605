//! Validation and decoding of typed-string literal bodies.
//!
//! These helpers are shared by the parser (which attaches the literal's
//! [`Span`](crate::Span) to any failure) and by the validated
//! [`Value`](crate::Value) constructors.

use crate::ErrorKind;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid pattern")
});

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal pattern")
});

// ISO8601 durations: PnYnMnDTnHnMnS (fractions on the last component) or PnW.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-?P(?:\d+W|(?:\d+(?:[.,]\d+)?Y)?(?:\d+(?:[.,]\d+)?M)?(?:\d+(?:[.,]\d+)?D)?(?:T(?:\d+(?:[.,]\d+)?H)?(?:\d+(?:[.,]\d+)?M)?(?:\d+(?:[.,]\d+)?S)?)?)$",
    )
    .expect("valid duration pattern")
});

/// Standard alphabet that tolerates missing or present `=` padding.
const STANDARD_FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes a `b"…"` body: standard alphabet first, then URL-safe with
/// padding restored.
pub(crate) fn decode_bytes(body: &str) -> Result<Vec<u8>, ErrorKind> {
    if let Ok(bytes) = STANDARD_FORGIVING.decode(body) {
        return Ok(bytes);
    }
    let trimmed = body.trim_end_matches('=');
    let mut padded = String::with_capacity(trimmed.len() + 3);
    padded.push_str(trimmed);
    for _ in 0..(4 - trimmed.len() % 4) % 4 {
        padded.push('=');
    }
    URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|_| ErrorKind::InvalidBase64)
}

pub(crate) fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Validates a `u"…"` body and returns it lowercased.
pub(crate) fn canonical_uuid(body: &str) -> Result<String, ErrorKind> {
    if UUID_RE.is_match(body) {
        Ok(body.to_ascii_lowercase())
    } else {
        Err(ErrorKind::InvalidUuid)
    }
}

pub(crate) fn parse_datetime(body: &str) -> Result<DateTime<Utc>, ErrorKind> {
    DateTime::parse_from_rfc3339(body)
        .map_err(|_| ErrorKind::InvalidDateTime)
        .and_then(|dt| check_datetime(dt.with_timezone(&Utc)))
}

/// RFC3339 has room for four-digit years only, so instants outside
/// 0000..=9999 UTC cannot be written as a `t"…"` literal.
pub(crate) fn check_datetime(dt: DateTime<Utc>) -> Result<DateTime<Utc>, ErrorKind> {
    if (0..=9999).contains(&dt.year()) {
        Ok(dt)
    } else {
        Err(ErrorKind::InvalidDateTime)
    }
}

pub(crate) fn is_decimal(text: &str) -> bool {
    DECIMAL_RE.is_match(text)
}

pub(crate) fn is_duration(text: &str) -> bool {
    // A bare "P" or "PT" matches the pattern but names no component.
    DURATION_RE.is_match(text) && !text.ends_with('P') && !text.ends_with('T')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_standard_with_and_without_padding() {
        assert_eq!(decode_bytes("aGk=").unwrap(), b"hi");
        assert_eq!(decode_bytes("aGk").unwrap(), b"hi");
        assert_eq!(decode_bytes("").unwrap(), b"");
    }

    #[test]
    fn test_decode_url_safe_fallback() {
        // 0xfb 0xff encodes to "+/8" standard, "-_8" url-safe
        assert_eq!(decode_bytes("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_bytes("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_bytes("-_8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_bytes("!!!notbase64!!!"), Err(ErrorKind::InvalidBase64));
    }

    #[test]
    fn test_encode_uses_standard_padded() {
        assert_eq!(encode_bytes(&[0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn test_uuid_canonicalized() {
        assert_eq!(
            canonical_uuid("123E4567-E89B-12D3-A456-426614174000").unwrap(),
            "123e4567-e89b-12d3-a456-426614174000"
        );
        assert_eq!(canonical_uuid("not-a-uuid"), Err(ErrorKind::InvalidUuid));
        assert_eq!(
            canonical_uuid("123e4567e89b12d3a456426614174000"),
            Err(ErrorKind::InvalidUuid)
        );
        assert_eq!(
            canonical_uuid("123e4567-e89b-12d3-a456-42661417400g"),
            Err(ErrorKind::InvalidUuid)
        );
    }

    #[test]
    fn test_datetime() {
        let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");
        let shifted = parse_datetime("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(dt, shifted);
        assert_eq!(parse_datetime("not-a-date"), Err(ErrorKind::InvalidDateTime));
    }

    #[test]
    fn test_datetime_year_range() {
        assert!(parse_datetime("0000-01-01T00:00:00Z").is_ok());
        assert!(parse_datetime("9999-12-31T23:59:59Z").is_ok());
        // Shifting to UTC moves these out of the four-digit range.
        assert_eq!(
            parse_datetime("0000-01-01T00:00:00+01:00"),
            Err(ErrorKind::InvalidDateTime)
        );
        assert_eq!(
            parse_datetime("9999-12-31T23:00:00-02:00"),
            Err(ErrorKind::InvalidDateTime)
        );
    }

    #[test]
    fn test_decimal_shape() {
        for ok in ["0", "-1.50", "+3.", ".5", "1e10", "12.345E-6"] {
            assert!(is_decimal(ok), "{}", ok);
        }
        for bad in ["", "abc", "1.2.3", "--1", "1e"] {
            assert!(!is_decimal(bad), "{}", bad);
        }
    }

    #[test]
    fn test_duration_shape() {
        for ok in ["P1Y2M3DT4H5M6S", "PT1H", "P3W", "PT0.5S", "-P1D"] {
            assert!(is_duration(ok), "{}", ok);
        }
        for bad in ["", "P", "PT", "1H", "P1H", "PT1D"] {
            assert!(!is_duration(bad), "{}", bad);
        }
    }
}

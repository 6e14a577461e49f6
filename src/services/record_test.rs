use super::*;
use time::macros::datetime;

// =============================================================================
// normalize_text
// =============================================================================

#[test]
fn normalize_text_trims() {
    assert_eq!(normalize_text("  hello world \n").unwrap(), "hello world");
}

#[test]
fn normalize_text_rejects_empty() {
    assert_eq!(normalize_text(""), Err(SubmitError::Empty));
}

#[test]
fn normalize_text_rejects_whitespace_only() {
    assert_eq!(normalize_text("  \t\n "), Err(SubmitError::Empty));
}

#[test]
fn normalize_text_keeps_inner_whitespace() {
    assert_eq!(normalize_text(" a \n b ").unwrap(), "a \n b");
}

// =============================================================================
// Timestamp
// =============================================================================

#[test]
fn timestamp_truncates_to_seconds() {
    let ts = Timestamp::from_datetime(datetime!(2024-03-05 07:08:09.987 UTC));
    assert_eq!(ts.datetime().nanosecond(), 0);
    assert_eq!(ts.to_string(), "2024-03-05T07:08:09");
}

#[test]
fn timestamp_display_zero_pads_every_field() {
    let ts = Timestamp::from_datetime(datetime!(0987-01-02 03:04:05 UTC));
    assert_eq!(ts.to_string(), "0987-01-02T03:04:05");
    assert_eq!(format!("({ts} UTC)"), "(0987-01-02T03:04:05 UTC)");
}

#[test]
fn timestamp_converts_to_utc() {
    let ts = Timestamp::from_datetime(datetime!(2024-03-05 09:00:00 +02:00));
    assert_eq!(ts.to_string(), "2024-03-05T07:00:00");
}

#[test]
fn timestamp_next_after_never_goes_back() {
    let later = Timestamp::from_datetime(datetime!(2024-01-01 12:00:10 UTC));
    let earlier = Timestamp::from_datetime(datetime!(2024-01-01 12:00:00 UTC));
    assert_eq!(Timestamp::next_after(Some(later), earlier), later);
    assert_eq!(Timestamp::next_after(Some(earlier), later), later);
    assert_eq!(Timestamp::next_after(None, earlier), earlier);
}

#[test]
fn timestamp_serializes_as_iso_string() {
    let ts = Timestamp::from_datetime(datetime!(2023-12-31 23:59:59 UTC));
    assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2023-12-31T23:59:59\"");
}

#[test]
fn timestamp_now_has_no_subseconds() {
    assert_eq!(Timestamp::now().datetime().nanosecond(), 0);
}

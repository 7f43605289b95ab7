use chrono::TimeZone;

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 5).unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn availability_url_encodes_params() {
    let url = AvailabilityClient::availability_url(
        "https://at.govt.nz/umbraco/Surface/ParkingAvailabilitySurface/ParkingAvailabilityResult",
        &ids(&["civic", "downtown", "victoria st"]),
        "short-term",
        now(),
    )
    .unwrap();
    assert_eq!(
        url,
        "https://at.govt.nz/umbraco/Surface/ParkingAvailabilitySurface/ParkingAvailabilityResult\
         ?carparkIdParam=civic%2C+downtown%2C+victoria+st&categoryParam=short-term&t=20240501083005"
    );
}

#[test]
fn availability_url_single_id() {
    let url =
        AvailabilityClient::availability_url("https://example.com/avail", &ids(&["civic"]), "all", now())
            .unwrap();
    assert_eq!(
        url,
        "https://example.com/avail?carparkIdParam=civic&categoryParam=all&t=20240501083005"
    );
}

#[test]
fn availability_url_keeps_existing_query() {
    let url = AvailabilityClient::availability_url(
        "https://example.com/avail?lang=en",
        &ids(&["civic"]),
        "all",
        now(),
    )
    .unwrap();
    assert!(url.starts_with("https://example.com/avail?lang=en&carparkIdParam=civic"));
}

#[test]
fn availability_url_rejects_invalid_endpoint() {
    let result = AvailabilityClient::availability_url("not-a-url", &ids(&["civic"]), "all", now());
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidEndpoint { .. }),
        "expected InvalidEndpoint, got: {err:?}"
    );
}

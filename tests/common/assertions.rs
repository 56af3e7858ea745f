//! Assertion helpers for tests.

use axum::http::StatusCode;
use beadgrid::models::ProcessingResult;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
    assert_eq!(json["errorMessage"], json["error"], "errorMessage mirrors error");
}

/// Assert a successful conversion and return the parsed result
pub fn assert_valid_result(response: &TestResponse) -> ProcessingResult {
    assert_ok(response);
    let result: ProcessingResult = response.json();

    assert_eq!(result.pixel_data.len(), result.height, "row count");
    for row in &result.pixel_data {
        assert_eq!(row.len(), result.width, "row width");
        for label in row.iter().flatten() {
            assert!(
                result.palette.contains(label),
                "cell {label} is not a palette entry"
            );
        }
    }
    assert_eq!(result.stats.final_color_count, result.palette.len());

    result
}

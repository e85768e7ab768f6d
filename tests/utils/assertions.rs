//! Test assertion helpers - fluent API for verifying responses
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::http::StatusCode;
use serde_json::Value;

use super::actions::TestResponse;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct ResponseAssertion<'a> {
    response: &'a TestResponse,
}

impl<'a> ResponseAssertion<'a> {
    pub fn of(response: &'a TestResponse) -> Self {
        Self { response }
    }

    pub fn has_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.response.status, expected,
            "unexpected status, body: {}",
            self.response.body
        );
        self
    }

    /// Compares the value at a JSON pointer such as `/record/won`
    pub fn field_eq(self, pointer: &str, expected: impl Into<Value>) -> Self {
        let expected: Value = expected.into();
        let actual = self
            .response
            .body
            .pointer(pointer)
            .unwrap_or_else(|| panic!("{} missing from {}", pointer, self.response.body));
        assert_eq!(actual, &expected, "at {}", pointer);
        self
    }

    pub fn field_is_null(self, pointer: &str) -> Self {
        let actual = self.response.body.pointer(pointer);
        assert!(
            actual.map_or(true, Value::is_null),
            "expected {} to be null in {}",
            pointer,
            self.response.body
        );
        self
    }

    pub fn array_len(self, pointer: &str, expected: usize) -> Self {
        let len = self
            .response
            .body
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or_else(|| panic!("{} is not an array in {}", pointer, self.response.body));
        assert_eq!(len, expected, "length of {}", pointer);
        self
    }

    /// Player names of a leaderboard or totals list, in order
    pub fn names_at(self, pointer: &str, expected: &[&str]) -> Self {
        let names: Vec<String> = self
            .response
            .body
            .pointer(pointer)
            .and_then(Value::as_array)
            .unwrap_or_else(|| panic!("{} is not an array in {}", pointer, self.response.body))
            .iter()
            .map(|entry| entry["player_name"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, expected, "names at {}", pointer);
        self
    }
}

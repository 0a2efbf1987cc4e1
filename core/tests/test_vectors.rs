//! Verify build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes the filter input, the expected request, a simulated
//! response and either the expected characters or the expected error kind.

use character_core::{
    Character, CharacterClient, FetchError, FilterChoice, Filters, GenderFilter, HttpResponse, StatusFilter,
};

const BASE_URL: &str = "http://localhost:3000/api";

fn client() -> CharacterClient {
    CharacterClient::new(BASE_URL)
}

/// Map an optional wire value back onto the closed filter enum.
fn filter_from<F: FilterChoice>(raw: &serde_json::Value) -> F {
    match raw.as_str() {
        None => F::default(),
        Some(s) => *F::CANDIDATES
            .iter()
            .find(|c| c.as_query_value() == Some(s))
            .unwrap_or_else(|| panic!("unknown filter value: {s}")),
    }
}

fn pairs(raw: &serde_json::Value) -> Vec<(String, String)> {
    raw.as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

#[test]
fn fetch_characters_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch_characters.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let filters = Filters::new(
            filter_from::<GenderFilter>(&case["input"]["gender"]),
            filter_from::<StatusFilter>(&case["input"]["status"]),
        );
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_fetch_characters(filters);
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.query, pairs(&expected_req["query"]), "{name}: query");
        assert_eq!(req.headers, pairs(&expected_req["headers"]), "{name}: headers");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_fetch_characters(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Http" => assert!(matches!(err, FetchError::Http { .. }), "{name}: expected Http"),
                "Deserialization" => {
                    assert!(matches!(err, FetchError::Deserialization(_)), "{name}: expected Deserialization")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let characters = result.unwrap();
            let expected: Vec<Character> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(characters, expected, "{name}: parsed result");
        }
    }
}

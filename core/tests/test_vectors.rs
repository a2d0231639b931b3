//! Verify request building and response decoding against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each build case pairs a request description with the wire request it must
//! produce; each response case pairs a simulated response with the decoded
//! value or error it must yield. JSON bodies are compared as parsed values
//! to avoid false negatives from field ordering.

use rest_request::{
    handle_response, BaseUrlConfig, HttpMethod, HttpResponse, RequestError, RequestOptions,
    RequestSpec, ResponseValue,
};

/// Parse the expected header list (`[["name", "value"], ...]`).
fn parse_headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let raw = include_str!("../../test-vectors/build.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let config = BaseUrlConfig::new(vectors["base_url"].as_str().unwrap())
        .unwrap()
        .with_version(vectors["version"].as_str().unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let options: RequestOptions = serde_json::from_value(case["options"].clone()).unwrap();
        let expected = &case["expected_request"];

        let spec = RequestSpec::new(options, &config).unwrap();
        assert_eq!(
            spec.http_version_label(),
            expected["version_label"].as_str(),
            "{name}: version label"
        );

        let req = spec.to_http_request().unwrap();
        let method: HttpMethod = expected["method"].as_str().unwrap().parse().unwrap();
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, parse_headers(&expected["headers"]), "{name}: headers");

        match expected["body"].as_str() {
            None => assert!(req.body.is_none(), "{name}: body should be None"),
            Some(body) => {
                let actual = req.body.as_deref().expect("body present");
                match (
                    serde_json::from_str::<serde_json::Value>(body),
                    serde_json::from_str::<serde_json::Value>(actual),
                ) {
                    (Ok(want), Ok(got)) => assert_eq!(got, want, "{name}: body"),
                    _ => assert_eq!(actual, body, "{name}: body"),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/response.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let headers = match sim["content_type"].as_str() {
            Some(ct) => vec![("Content-Type".to_string(), ct.to_string())],
            None => Vec::new(),
        };
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers,
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = handle_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "HttpStatus" => {
                    let status = case["expected_status"].as_u64().unwrap() as u16;
                    assert_eq!(err.status(), Some(status), "{name}: expected HttpStatus");
                }
                "Decode" => assert!(matches!(err, RequestError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let value = result.unwrap();
            let expected = &case["expected_result"];
            if let Some(json) = expected.get("json") {
                assert_eq!(value, ResponseValue::Json(json.clone()), "{name}: parsed json");
            } else {
                let text = expected["text"].as_str().unwrap();
                assert_eq!(value, ResponseValue::Text(text.to_string()), "{name}: text");
            }
        }
    }
}

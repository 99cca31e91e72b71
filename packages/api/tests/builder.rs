//! Builder behaviour that needs no server

use std::time::Duration;

use curlew::{ClientConfig, Curlew, MultipartBody, Part};
use http::Method;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

#[test]
fn invalid_header_name_is_reported_by_build() {
    let err = Curlew::new()
        .get("http://localhost/")
        .header("bad header", "value")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn invalid_header_value_is_reported_by_build() {
    let err = Curlew::new()
        .get("http://localhost/")
        .header("X-Thing", "line\nbreak")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn first_deferred_problem_wins() {
    let err = Curlew::new()
        .get("http://localhost/")
        .timeout(Duration::ZERO)
        .header("bad header", "value")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_state());
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn zero_timeout_is_invalid() {
    let err = Curlew::new()
        .get("http://localhost/")
        .timeout(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn malformed_url_is_reported_by_build() {
    let err = Curlew::new().get("not a url").build().unwrap_err();
    assert!(err.is_url());
}

#[test]
fn unsupported_scheme_is_a_url_error() {
    let err = Curlew::new().get("ftp://localhost/file").build().unwrap_err();
    assert!(err.is_url());
}

#[test]
fn descriptor_reflects_the_chain() {
    let request = Curlew::new()
        .request(Method::POST, "http://localhost:8080/items")
        .query_param("page", "2")
        .header(ACCEPT.as_str(), "application/json")
        .timeout(Duration::from_secs(3))
        .json(&serde_json::json!({"id": 7}))
        .unwrap()
        .build()
        .unwrap();

    let descriptor = request.descriptor();
    assert_eq!(descriptor.method(), &Method::POST);
    assert_eq!(descriptor.url().as_str(), "http://localhost:8080/items?page=2");
    assert_eq!(descriptor.timeout(), Some(Duration::from_secs(3)));
    assert_eq!(descriptor.headers()[ACCEPT], "application/json");
    assert_eq!(descriptor.headers()[CONTENT_TYPE], "application/json");
    assert!(descriptor.headers().contains_key(USER_AGENT));
    assert_eq!(&descriptor.body_bytes()[..], br#"{"id":7}"#);
}

#[test]
fn configured_user_agent_is_used() {
    let curlew = Curlew::with_config(ClientConfig::builder().user_agent("inventory-sync/1").build().unwrap());
    let request = curlew.get("http://localhost/").build().unwrap();
    assert_eq!(request.descriptor().headers()[USER_AGENT], "inventory-sync/1");
}

#[test]
fn append_header_keeps_earlier_values() {
    let request = Curlew::new()
        .get("http://localhost/")
        .header("X-Tag", "a")
        .append_header("X-Tag", "b")
        .build()
        .unwrap();
    let values: Vec<_> = request.descriptor().headers().get_all("x-tag").iter().collect();
    assert_eq!(values, ["a", "b"]);

    let request = Curlew::new()
        .get("http://localhost/")
        .header("X-Tag", "a")
        .header("X-Tag", "b")
        .build()
        .unwrap();
    let values: Vec<_> = request.descriptor().headers().get_all("x-tag").iter().collect();
    assert_eq!(values, ["b"]);
}

#[test]
fn headers_from_an_iterator() {
    let request = Curlew::new()
        .get("http://localhost/")
        .headers([("X-One", "1"), ("X-Two", "2")])
        .build()
        .unwrap();
    let headers = request.descriptor().headers();
    assert_eq!(headers["x-one"], "1");
    assert_eq!(headers["x-two"], "2");
}

#[test]
fn multipart_content_type_carries_the_boundary() {
    let request = Curlew::new()
        .post("http://localhost/upload")
        .body(MultipartBody::with_boundary("XYZ").part("a", Part::text("1")))
        .build()
        .unwrap();
    assert_eq!(
        request.descriptor().headers()[CONTENT_TYPE],
        "multipart/form-data;boundary=XYZ"
    );
}

#[test]
fn no_body_means_no_content_type() {
    let request = Curlew::new().get("http://localhost/").build().unwrap();
    assert!(!request.descriptor().headers().contains_key(CONTENT_TYPE));
    assert!(request.descriptor().body_bytes().is_empty());
}

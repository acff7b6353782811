//! Tests for applying request checksums and validating responses.

use std::io::{self, Cursor, Read};

use url::Url;

use super::*;
use crate::aws_chunked::AwsChunkedWrapper;
use crate::checksum::{ChecksumAlgorithm, ChecksumRegistry};
use crate::config::ChecksumConfig;
use crate::context::{
    ChecksumAlgorithmSpec, ChecksumLocation, RequestAlgorithmHeader, RequestContext,
};
use crate::error::ChecksumError;
use crate::http::{Body, Headers, HttpRequest, HttpResponse, ResponseBody};
use crate::model::OperationModel;

fn registry() -> ChecksumRegistry {
    ChecksumRegistry::portable()
}

fn build_request(body: impl Into<Body>) -> HttpRequest {
    HttpRequest::new("PUT", Url::parse("https://example.com").unwrap()).with_body(body)
}

fn with_crc32(mut request: HttpRequest, location: ChecksumLocation) -> HttpRequest {
    let requested = ChecksumAlgorithmSpec::new(ChecksumAlgorithm::Crc32, location);
    request.context.checksum.request_algorithm = Some(requested);
    request
}

fn body_bytes(request: HttpRequest) -> Vec<u8> {
    let mut out = Vec::new();
    request.body.into_reader().read_to_end(&mut out).unwrap();
    out
}

#[test]
fn no_checksum_context_is_noop() {
    let mut request = build_request(Vec::new());
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert!(request.headers.is_empty());
    assert!(matches!(request.body, Body::Bytes(ref b) if b.is_empty()));
    assert_eq!(request.url.as_str(), "https://example.com/");
}

#[test]
fn unknown_location_rejected_at_parse() {
    let err = "http-trailer".parse::<ChecksumLocation>().unwrap_err();
    assert!(matches!(
        err,
        ChecksumError::InvalidLocation { ref location } if location == "http-trailer"
    ));
}

#[test]
fn header_from_bytes() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Header);
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(
        request.headers.get("x-amz-checksum-crc32"),
        Some("AAAAAA==")
    );
}

#[test]
fn header_from_reader() {
    let mut request = with_crc32(
        build_request(Body::stream(Cursor::new(b"hello world".to_vec()))),
        ChecksumLocation::Header,
    );
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(
        request.headers.get("x-amz-checksum-crc32"),
        Some("DUoRhQ==")
    );
    assert_eq!(body_bytes(request), b"hello world");
}

#[test]
fn header_rejects_framed_body() {
    let wrapper = AwsChunkedWrapper::new(Body::from("hello world").into_reader());
    let mut request = with_crc32(
        build_request(Body::AwsChunked(wrapper)),
        ChecksumLocation::Header,
    );
    let err = apply_request_checksum(&mut request, &registry()).unwrap_err();
    match err {
        ChecksumError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
        other => panic!("unexpected {other:?}"),
    }
    assert!(!request.headers.contains("x-amz-checksum-crc32"));
    assert!(matches!(request.body, Body::AwsChunked(_)));
}

#[test]
fn header_explicit_digest_kept() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Header);
    request.headers.insert("x-amz-checksum-crc32", "foo");
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(request.headers.get("x-amz-checksum-crc32"), Some("foo"));
}

#[test]
fn trailer_from_bytes() {
    let mut request = with_crc32(build_request("hello world"), ChecksumLocation::Trailer);
    request.headers.insert("Content-Length", "11");
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert!(!request.headers.contains("x-amz-checksum-crc32"));
    assert!(matches!(request.body, Body::AwsChunked(_)));
    assert_eq!(request.headers.get("Transfer-Encoding"), Some("chunked"));
    assert_eq!(
        request.headers.get("x-amz-trailer"),
        Some("x-amz-checksum-crc32")
    );
    assert_eq!(
        request.headers.get("X-Amz-Decoded-Content-Length"),
        Some("11")
    );
    assert!(!request.headers.contains("content-length"));
    assert_eq!(
        body_bytes(request),
        b"b\r\nhello world\r\n0\r\nx-amz-checksum-crc32:DUoRhQ==\r\n\r\n"
    );
}

#[test]
fn trailer_from_reader() {
    let mut request = with_crc32(
        build_request(Body::stream(Cursor::new(Vec::new()))),
        ChecksumLocation::Trailer,
    );
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert!(!request.headers.contains("x-amz-checksum-crc32"));
    assert!(matches!(request.body, Body::AwsChunked(_)));
    assert!(!request.headers.contains(AMZ_DECODED_CONTENT_LENGTH));
}

#[test]
fn trailer_uses_configured_chunk_size() {
    let config = ChecksumConfig {
        chunk_size: 5,
        ..ChecksumConfig::default()
    };
    let mut request = build_request("hello world").with_context(RequestContext::new(config));
    request = with_crc32(request, ChecksumLocation::Trailer);
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(
        body_bytes(request),
        b"5\r\nhello\r\n5\r\n worl\r\n1\r\nd\r\n0\r\nx-amz-checksum-crc32:DUoRhQ==\r\n\r\n"
    );
}

#[test]
fn trailer_explicit_digest_kept() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Trailer);
    request.headers.insert("x-amz-checksum-crc32", "foo");
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(request.headers.get("x-amz-checksum-crc32"), Some("foo"));
    assert!(matches!(request.body, Body::Bytes(_)));
    assert!(!request.headers.contains("Content-Encoding"));
}

#[test]
fn content_encoding_preset() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Trailer);
    request.headers.insert("Content-Encoding", "foo");
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(
        request.headers.get("Content-Encoding"),
        Some("foo,aws-chunked")
    );
}

#[test]
fn content_encoding_default() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Trailer);
    apply_request_checksum(&mut request, &registry()).unwrap();
    assert_eq!(request.headers.get("Content-Encoding"), Some("aws-chunked"));
}

#[test]
fn companion_header_applied() {
    for location in [ChecksumLocation::Header, ChecksumLocation::Trailer] {
        let mut request = with_crc32(build_request(Vec::new()), location);
        request.context.checksum.request_algorithm_header = Some(RequestAlgorithmHeader {
            name: "foo".into(),
            value: "bar".into(),
        });
        apply_request_checksum(&mut request, &registry()).unwrap();
        assert_eq!(request.headers.get("foo"), Some("bar"), "{location}");
    }
}

#[test]
fn algorithm_unavailable_at_apply() {
    let mut request = with_crc32(build_request(Vec::new()), ChecksumLocation::Header);
    let empty = registry().restricted_to(&[]);
    let err = apply_request_checksum(&mut request, &empty).unwrap_err();
    assert!(matches!(err, ChecksumError::UnsupportedAlgorithm { .. }));
}

fn response_context() -> RequestContext {
    let mut context = RequestContext::default();
    context.checksum.response_algorithms =
        Some(vec![ChecksumAlgorithm::Sha1, ChecksumAlgorithm::Crc32]);
    context
}

fn response(header: (&str, &str), body: ResponseBody) -> HttpResponse {
    let headers: Headers = [(header.0.to_string(), header.1.to_string())]
        .into_iter()
        .collect();
    HttpResponse::new(200, headers, body)
}

fn streaming_body() -> ResponseBody {
    ResponseBody::stream(Cursor::new(b"hello world".to_vec()))
}

fn get_object() -> OperationModel {
    OperationModel::new("GetObject")
}

#[test]
fn handle_body_buffered() {
    let context = response_context();
    let op = get_object();

    let mut resp = response(("x-amz-checksum-crc32", "DUoRhQ=="), "hello world".into());
    handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap();
    assert_eq!(resp.body.bytes(), Some(&b"hello world"[..]));
    assert_eq!(
        resp.context.response_algorithm,
        Some(ChecksumAlgorithm::Crc32)
    );

    let mut resp = response(("x-amz-checksum-crc32", "WrOonG=="), "hello world".into());
    let err = handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap_err();
    assert!(matches!(
        err,
        ChecksumError::ValidationFailed {
            algorithm: ChecksumAlgorithm::Crc32,
            ..
        }
    ));

    let mut resp = response(("x-amz-checksum-foo", "FOO=="), "hello world".into());
    handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap();
    assert_eq!(resp.body.bytes(), Some(&b"hello world"[..]));
    assert_eq!(resp.context.response_algorithm, None);
}

#[test]
fn handle_body_streaming() {
    let context = response_context();
    let op = get_object().with_streaming_output();

    let mut resp = response(("x-amz-checksum-crc32", "DUoRhQ=="), streaming_body());
    handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap();
    assert!(resp.body.is_validating());
    assert_eq!(
        resp.context.response_algorithm,
        Some(ChecksumAlgorithm::Crc32)
    );
    assert_eq!(resp.body.read_to_vec().unwrap(), b"hello world");

    let mut resp = response(("x-amz-checksum-crc32", "WrOonG=="), streaming_body());
    handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap();
    let err = resp.body.read_to_vec().unwrap_err();
    assert!(matches!(
        ChecksumError::from_io(&err),
        Some(ChecksumError::ValidationFailed { .. })
    ));

    let mut resp = response(("x-amz-checksum-foo", "FOOO=="), streaming_body());
    handle_checksum_body(&mut resp, &context, &op, &registry()).unwrap();
    assert!(!resp.body.is_validating());
    assert_eq!(resp.body.read_to_vec().unwrap(), b"hello world");
}

#[test]
fn composite_skipped_buffered() {
    let mut resp = response(("x-amz-checksum-crc32", "FOOO==-123"), "hello world".into());
    handle_checksum_body(&mut resp, &response_context(), &get_object(), &registry()).unwrap();
    assert_eq!(resp.body.bytes(), Some(&b"hello world"[..]));
    assert_eq!(resp.context.response_algorithm, None);
}

#[test]
fn composite_skipped_streaming() {
    let op = get_object().with_streaming_output();
    let mut resp = response(("x-amz-checksum-crc32", "FOOO==-123"), streaming_body());
    handle_checksum_body(&mut resp, &response_context(), &op, &registry()).unwrap();
    assert!(!resp.body.is_validating());
    assert_eq!(resp.body.read_to_vec().unwrap(), b"hello world");
}

#[test]
fn composite_falls_through_to_next_candidate() {
    let headers: Headers = [
        ("x-amz-checksum-sha1".to_string(), "FOOO==-3".to_string()),
        ("x-amz-checksum-crc32".to_string(), "DUoRhQ==".to_string()),
    ]
    .into_iter()
    .collect();
    let mut resp = HttpResponse::new(200, headers, "hello world");
    handle_checksum_body(&mut resp, &response_context(), &get_object(), &registry()).unwrap();
    assert_eq!(
        resp.context.response_algorithm,
        Some(ChecksumAlgorithm::Crc32)
    );
}

#[test]
fn no_response_algorithms_is_noop() {
    let mut resp = response(("x-amz-checksum-crc32", "WrOonG=="), "hello world".into());
    let context = RequestContext::default();
    handle_checksum_body(&mut resp, &context, &get_object(), &registry()).unwrap();
    assert_eq!(resp.context.response_algorithm, None);
}

#[test]
fn buffered_stream_body_is_validated() {
    let mut resp = response(("x-amz-checksum-crc32", "DUoRhQ=="), streaming_body());
    handle_checksum_body(&mut resp, &response_context(), &get_object(), &registry()).unwrap();
    assert_eq!(resp.body.bytes(), Some(&b"hello world"[..]));
}

//! Stream and reader result shapes.

use crate::integration::mock_server::{MockServerFixture, SERVICE_PATH};
use restful_ws_client::params;
use std::io::Read;

#[test]
fn test_get_as_stream_returns_raw_bytes() {
    let mut fixture = MockServerFixture::new();
    let _m = fixture
        .server
        .mock("GET", SERVICE_PATH)
        .match_query(mockito::Matcher::Exact("id=1".to_string()))
        .with_body([0xCAu8, 0xFE, 0x00, 0x01])
        .create();

    let mut body = fixture.client().get_as_stream(&params! { "id" => 1 }).unwrap();
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, vec![0xCA, 0xFE, 0x00, 0x01]);
}

#[test]
fn test_post_as_stream_unbuffered() {
    let mut fixture = MockServerFixture::new();
    let _m = fixture.mock_post("id=1", 200, "payload");

    let client = fixture.builder().buffer_size(0).build().unwrap();
    let mut body = client.post_as_stream(&params! { "id" => 1 }).unwrap();
    let mut text = String::new();
    body.read_to_string(&mut text).unwrap();
    assert_eq!(text, "payload");
}

#[test]
fn test_get_as_reader_transcodes() {
    let mut fixture = MockServerFixture::new();
    let _m = fixture
        .server
        .mock("GET", SERVICE_PATH)
        .with_body([0x5Au8, 0xFC, 0x72, 0x69, 0x63, 0x68])
        .create();

    let client = fixture.builder().charset("latin1").build().unwrap();
    let mut reader = client.get_as_reader(&params! {}).unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(text, "Zürich");
}

#[test]
fn test_post_as_reader_large_body() {
    let mut fixture = MockServerFixture::new();
    let big = "ü".repeat(100_000);
    let _m = fixture.mock_post("n=1", 200, &big);

    let client = fixture.builder().buffer_size(64).build().unwrap();
    let mut reader = client.post_as_reader(&params! { "n" => 1 }).unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(text, big);
}

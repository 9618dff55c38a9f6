//! Result caching across calls and clients.

use crate::integration::mock_server::{MockServerFixture, SERVICE_PATH};
use restful_ws_client::cache::{LruCache, MemoryCache};
use restful_ws_client::{params, CacheBackend, CachedValue, Method, RequestIdentity, ResultFormat};
use std::sync::Arc;

#[test]
fn test_text_results_served_from_cache() {
    let mut fixture = MockServerFixture::new();
    let m = fixture
        .mock_get_expect("str=dog", 200, "<r>1</r>", 1);

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    let p = params! { "str" => "dog" };
    assert_eq!(client.get(&p).unwrap(), "<r>1</r>");
    assert_eq!(client.get(&p).unwrap(), "<r>1</r>");
    m.assert();

    let key = RequestIdentity::new(Some(ResultFormat::Text), Method::Get, p);
    assert_eq!(client.cached(&key), Some(CachedValue::Text("<r>1</r>".into())));
}

#[test]
fn test_no_cache_means_every_call_hits_network() {
    let mut fixture = MockServerFixture::new();
    let m = fixture.mock_get_expect("str=dog", 200, "x", 2);

    let client = fixture.client();
    let p = params! { "str" => "dog" };
    client.get(&p).unwrap();
    client.get(&p).unwrap();
    m.assert();
}

#[test]
fn test_get_and_post_cached_separately() {
    let mut fixture = MockServerFixture::new();
    let get = fixture.mock_get_expect("a=1", 200, "from get", 1);
    let post = fixture.mock_post_expect("a=1", 200, "from post", 1);

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    let p = params! { "a" => 1 };
    assert_eq!(client.get(&p).unwrap(), "from get");
    assert_eq!(client.post(&p).unwrap(), "from post");
    assert_eq!(client.get(&p).unwrap(), "from get");
    assert_eq!(client.post(&p).unwrap(), "from post");
    get.assert();
    post.assert();
}

#[test]
fn test_param_order_is_part_of_the_key() {
    let mut fixture = MockServerFixture::new();
    let ab = fixture.mock_get_expect("a=1&b=2", 200, "ab", 1);
    let ba = fixture.mock_get_expect("b=2&a=1", 200, "ba", 1);

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    assert_eq!(client.get(&params! { "a" => 1, "b" => 2 }).unwrap(), "ab");
    assert_eq!(client.get(&params! { "b" => 2, "a" => 1 }).unwrap(), "ba");
    ab.assert();
    ba.assert();
}

#[test]
fn test_xml_and_text_share_one_fetch() {
    let mut fixture = MockServerFixture::new();
    let m = fixture.mock_get_expect("id=3", 200, "<c/>", 1);

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    let p = params! { "id" => 3 };
    let first = client.get_as_xml(&p).unwrap();
    let second = client.get_as_xml(&p).unwrap();
    assert_eq!(first, second);
    assert_eq!(client.get(&p).unwrap(), "<c/>");
    m.assert();

    let cache = client.cache().unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_streams_are_never_cached() {
    let mut fixture = MockServerFixture::new();
    let m = fixture.mock_get_expect("id=3", 200, "raw", 2);

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    let p = params! { "id" => 3 };
    client.get_as_stream(&p).unwrap();
    client.get_as_reader(&p).unwrap();
    m.assert();
    assert!(client.cache().unwrap().is_empty());
}

#[test]
fn test_cache_shared_between_clients() {
    let mut fixture = MockServerFixture::new();
    let m = fixture.mock_get_expect("q=x", 200, "shared", 1);

    let cache: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new());
    let first = fixture.builder().cache(cache.clone()).build().unwrap();
    let second = fixture.builder().cache(cache.clone()).build().unwrap();

    let p = params! { "q" => "x" };
    assert_eq!(first.get(&p).unwrap(), "shared");
    assert_eq!(second.get(&p).unwrap(), "shared");
    m.assert();
}

#[test]
fn test_clear_cache_forces_refetch() {
    let mut fixture = MockServerFixture::new();
    let m = fixture.mock_get_expect("q=x", 200, "v", 2);

    let client = fixture.builder().cache(Arc::new(LruCache::new(8))).build().unwrap();
    let p = params! { "q" => "x" };
    client.get(&p).unwrap();
    client.clear_cache();
    client.get(&p).unwrap();
    m.assert();
}

#[test]
fn test_failed_calls_are_not_cached() {
    let mut fixture = MockServerFixture::new();
    let _m = fixture
        .server
        .mock("GET", SERVICE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create();

    let client = fixture.builder().cache(Arc::new(MemoryCache::new())).build().unwrap();
    assert!(client.get(&params! { "q" => "x" }).is_err());
    assert!(client.cache().unwrap().is_empty());
}

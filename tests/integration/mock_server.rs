//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use restful_ws_client::{RestClient, RestClientBuilder};

pub const SERVICE_PATH: &str = "/webservices/concept/find";

/// Test fixture that owns a mock server for one test.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = format!("{}{}", server.url(), SERVICE_PATH);
        Self { server, base_url }
    }

    /// Builder pointed at the mock service.
    pub fn builder(&self) -> RestClientBuilder {
        RestClient::builder().base_url(&self.base_url)
    }

    pub fn client(&self) -> RestClient {
        self.builder().build().expect("client should build")
    }

    /// GET with an exact raw query string.
    pub fn mock_get(&mut self, query: &str, status: usize, body: &str) -> Mock {
        self.mock_get_expect(query, status, body, 1)
    }

    pub fn mock_get_expect(&mut self, query: &str, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("GET", SERVICE_PATH)
            .match_query(Matcher::Exact(query.to_string()))
            .with_status(status)
            .with_header("content-type", "application/xml")
            .with_body(body)
            .expect(hits)
            .create()
    }

    /// POST with an exact form body, any query.
    pub fn mock_post(&mut self, body_match: &str, status: usize, body: &str) -> Mock {
        self.mock_post_expect(body_match, status, body, 1)
    }

    pub fn mock_post_expect(
        &mut self,
        body_match: &str,
        status: usize,
        body: &str,
        hits: usize,
    ) -> Mock {
        self.server
            .mock("POST", SERVICE_PATH)
            .match_query(Matcher::Any)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::Exact(body_match.to_string()))
            .with_status(status)
            .with_body(body)
            .expect(hits)
            .create()
    }
}

//! Stateless HTTP request builder and response parser for the character API.
//!
//! # Design
//! `CharacterClient` holds only a `base_url` and carries no mutable state
//! between calls. Fetching is split into `build_fetch_characters`, which
//! produces an `HttpRequest`, and `parse_fetch_characters`, which consumes an
//! `HttpResponse`. `fetch_characters` joins the two over a `Transport` for
//! callers that let the core drive the round-trip.

use tracing::{debug, error};
use url::Url;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Character, CharacterPage, Filters};

/// Origin of the public character API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Synchronous, stateless client for the character collection.
#[derive(Debug, Clone)]
pub struct CharacterClient {
    base_url: String,
}

impl Default for CharacterClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CharacterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Like `new`, but rejects a base that is not an absolute URL.
    pub fn try_new(base_url: &str) -> Result<Self, FetchError> {
        let client = Self::new(base_url);
        Url::parse(&client.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `<base>/character`, with a query pair for each set filter. Unset
    /// filters are left out of the query entirely.
    pub fn build_fetch_characters(&self, filters: Filters) -> HttpRequest {
        HttpRequest {
            path: format!("{}/character", self.base_url),
            query: filters.query_pairs(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Extract `results` from the response body, in server order.
    pub fn parse_fetch_characters(&self, response: HttpResponse) -> Result<Vec<Character>, FetchError> {
        check_status(&response)?;
        let page: CharacterPage =
            serde_json::from_str(&response.body).map_err(|e| FetchError::Deserialization(e.to_string()))?;
        Ok(page.results)
    }

    /// Build, execute and parse in one call. Failures are logged here and
    /// returned unchanged; there is no retry.
    pub fn fetch_characters<T: Transport + ?Sized>(
        &self,
        transport: &T,
        filters: Filters,
    ) -> Result<Vec<Character>, FetchError> {
        let request = self.build_fetch_characters(filters);
        let result = transport
            .execute(&request)
            .and_then(|response| self.parse_fetch_characters(response));
        match &result {
            Ok(characters) => debug!(count = characters.len(), ?filters, "fetched characters"),
            Err(e) => error!(error = %e, ?filters, "error fetching characters"),
        }
        result
    }
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::types::{FilterChoice, GenderFilter, StatusFilter};

    fn client() -> CharacterClient {
        CharacterClient::new("http://localhost:3000/api")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// Records every request and replies with a fixed result.
    struct Recording {
        requests: RefCell<Vec<HttpRequest>>,
        reply: fn() -> Result<HttpResponse, FetchError>,
    }

    impl Transport for Recording {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            self.requests.borrow_mut().push(request.clone());
            (self.reply)()
        }
    }

    #[test]
    fn build_without_filters_sends_no_query() {
        let req = client().build_fetch_characters(Filters::default());
        assert_eq!(req.path, "http://localhost:3000/api/character");
        assert!(req.query.is_empty());
        assert_eq!(req.url().unwrap().query(), None);
    }

    #[test]
    fn build_omits_every_unset_filter() {
        for &gender in [GenderFilter::All].iter().chain(GenderFilter::CANDIDATES) {
            for &status in [StatusFilter::All].iter().chain(StatusFilter::CANDIDATES) {
                let req = client().build_fetch_characters(Filters::new(gender, status));
                assert_eq!(req.query_param("gender"), gender.as_query_value());
                assert_eq!(req.query_param("status"), status.as_query_value());
                let expected = usize::from(!gender.is_all()) + usize::from(!status.is_all());
                assert_eq!(req.query.len(), expected);
            }
        }
    }

    #[test]
    fn build_gender_only() {
        let req = client().build_fetch_characters(Filters::new(GenderFilter::Female, StatusFilter::All));
        assert_eq!(
            req.url().unwrap().as_str(),
            "http://localhost:3000/api/character?gender=female"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CharacterClient::new("http://localhost:3000/api/");
        let req = client.build_fetch_characters(Filters::default());
        assert_eq!(req.path, "http://localhost:3000/api/character");
    }

    #[test]
    fn try_new_rejects_relative_base() {
        assert!(matches!(CharacterClient::try_new("not a url"), Err(FetchError::InvalidUrl(_))));
        let client = CharacterClient::try_new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn default_targets_public_api() {
        assert_eq!(CharacterClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parse_keeps_server_order() {
        let body = r#"{"results":[
            {"id":2,"name":"Morty Smith","status":"Alive","species":"Human","gender":"Male","image":"http://x/2.png"},
            {"id":1,"name":"Rick Sanchez","status":"Alive","species":"Human","gender":"Male","image":"http://x/1.png"}
        ]}"#;
        let characters = client().parse_fetch_characters(ok(body)).unwrap();
        let ids: Vec<i64> = characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn parse_not_found_is_http_error() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"error":"There is nothing here"}"#.to_string(),
        };
        let err = client().parse_fetch_characters(response).unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_fetch_characters(ok("not json")).unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn parse_missing_results_field() {
        let err = client().parse_fetch_characters(ok(r#"{"info":{}}"#)).unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn fetch_issues_one_request_and_returns_results() {
        let transport = Recording {
            requests: RefCell::new(Vec::new()),
            reply: || Ok(ok(r#"{"results":[]}"#)),
        };
        let filters = Filters::new(GenderFilter::All, StatusFilter::Unknown);
        let characters = client().fetch_characters(&transport, filters).unwrap();
        assert!(characters.is_empty());

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("status"), Some("unknown"));
        assert_eq!(requests[0].query_param("gender"), None);
    }

    #[test]
    fn fetch_propagates_transport_failure() {
        let transport = Recording {
            requests: RefCell::new(Vec::new()),
            reply: || Err(FetchError::Transport("connection refused".to_string())),
        };
        let err = client()
            .fetch_characters(&transport, Filters::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(transport.requests.borrow().len(), 1);
    }
}

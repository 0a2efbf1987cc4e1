//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; the
//! host (or a `Transport`) executes the I/O. Only GET is ever issued, so the
//! method is implied.
//!
//! Query parameters are kept as explicit pairs rather than baked into the
//! path, so an omitted filter is visibly absent from the request.

use url::Url;

use crate::error::FetchError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Absolute URL with the query pairs percent-encoded.
    pub fn url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.path).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed to
/// `CharacterClient::parse_fetch_characters`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &[(&str, &str)]) -> HttpRequest {
        HttpRequest {
            path: "https://example.test/api/character".to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        let url = request(&[]).url().unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/character");
    }

    #[test]
    fn url_appends_pairs_in_order() {
        let url = request(&[("gender", "female"), ("status", "dead")]).url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/api/character?gender=female&status=dead"
        );
    }

    #[test]
    fn url_rejects_relative_path() {
        let req = HttpRequest {
            path: "/character".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
        };
        assert!(matches!(req.url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn query_param_lookup() {
        let req = request(&[("status", "alive")]);
        assert_eq!(req.query_param("status"), Some("alive"));
        assert_eq!(req.query_param("gender"), None);
    }

    #[test]
    fn success_range() {
        let mut resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(resp.is_success());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
    }
}

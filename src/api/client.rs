use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::VideoRecord;

/// Where the backend lives. A deployment detail rather than a configuration
/// surface: the service is only ever reached on the local machine.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// The two failure classes the UI distinguishes. Everything that is not an
/// explicit credential rejection collapses into `Transport`: unreachable
/// backend, non-2xx status, or a body we cannot decode.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered and explicitly denied the credentials.
    #[error("credentials rejected by backend")]
    Rejected,
    /// The call itself failed; the backend never gave a usable answer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Shape of the login endpoint's reply. The backend signals rejection with
/// `success: false` rather than an error status.
#[derive(Deserialize)]
struct LoginResponse {
    success: bool,
}

/// Request body for the login endpoint. Borrowed fields keep the password
/// from being copied around more than the one serialization requires.
#[derive(Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
}

/// Thin wrapper over a blocking reqwest client bound to one base URL. Cheap
/// to clone (the inner client is reference-counted), which is how each worker
/// thread gets its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Build a client against the given base URL. Tests point this at a
    /// throwaway address; production always uses [`DEFAULT_BASE_URL`].
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    /// Submit credentials to `POST /api/login`. Returns `Ok(())` when the
    /// backend reports success, `ApiError::Rejected` when it reports
    /// `success: false`, and `ApiError::Transport` for everything else. The
    /// password lives only in the request body; it is never logged or kept.
    pub fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let request = self.login_request(username, password)?;
        let response = self.http.execute(request)?.error_for_status()?;
        let body: LoginResponse = response.json()?;
        if body.success {
            Ok(())
        } else {
            Err(ApiError::Rejected)
        }
    }

    /// Run a free-text query against `GET /api/games/search?q=...` and decode
    /// the resulting record list in backend order.
    pub fn search(&self, query: &str) -> Result<Vec<VideoRecord>, ApiError> {
        let request = self.search_request(query)?;
        let response = self.http.execute(request)?.error_for_status()?;
        Ok(response.json()?)
    }

    fn login_request(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::blocking::Request, ApiError> {
        Ok(self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginPayload { username, password })
            .build()?)
    }

    // The query goes through reqwest's query-pair encoding instead of raw
    // string interpolation, so characters like '&' or spaces cannot mangle
    // the request URL.
    fn search_request(&self, query: &str) -> Result<reqwest::blocking::Request, ApiError> {
        Ok(self
            .http
            .get(format!("{}/api/games/search", self.base_url))
            .query(&[("q", query)])
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_targets_search_endpoint_with_encoded_query() {
        let client = ApiClient::new("http://localhost:5000/");
        let request = client
            .search_request("super mario & luigi")
            .expect("request should build");

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/api/games/search");
        assert_eq!(
            request.url().query(),
            Some("q=super+mario+%26+luigi"),
            "query must be percent-encoded, not raw-interpolated"
        );
    }

    #[test]
    fn search_request_preserves_plain_queries_verbatim() {
        let client = ApiClient::new("http://localhost:5000");
        let request = client.search_request("mario").unwrap();
        assert_eq!(request.url().query(), Some("q=mario"));
    }

    #[test]
    fn login_request_posts_json_credentials() {
        let client = ApiClient::new("http://localhost:5000");
        let request = client.login_request("a", "b").unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.url().path(), "/api/login");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(parsed["username"], "a");
        assert_eq!(parsed["password"], "b");
    }
}

//
//  gitlab-admin
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the GitLab REST API
//!
//! This module provides the core HTTP client for interacting with GitLab's
//! v4 REST API. It handles authentication, request/response serialization,
//! status classification and pagination headers.
//!
//! ## Features
//!
//! - Bearer token injection from a personal access token
//! - JSON serialization/deserialization with typed errors
//! - `X-Total-Pages` header extraction for page walks
//! - Pluggable progress observer
//! - Custom User-Agent header

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::{ApiError, ApiResult, Page, TOTAL_PAGES_HEADER};
use super::progress::{ProgressObserver, TracingObserver};
use super::projects::User;
use crate::auth::AuthCredential;

/// Default number of concurrent has-subgroups probes.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 8;

/// Builds the API root for a GitLab domain.
///
/// A bare host becomes `https://{host}/api/v4`; a value that already carries
/// a scheme keeps it.
///
/// # Example
///
/// ```rust
/// use gitlab_admin::api::client::api_root;
///
/// assert_eq!(api_root("gitlab.com"), "https://gitlab.com/api/v4");
/// assert_eq!(api_root("http://localhost:8080/"), "http://localhost:8080/api/v4");
/// ```
pub fn api_root(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    if domain.starts_with("http://") || domain.starts_with("https://") {
        format!("{}/api/v4", domain)
    } else {
        format!("https://{}/api/v4", domain)
    }
}

/// The main HTTP client for interacting with the GitLab API.
///
/// This client handles all HTTP communication with GitLab, including:
/// - Building request URLs from the API root
/// - Applying the bearer token
/// - Serializing request bodies and deserializing responses
/// - Mapping non-success statuses to [`ApiError`]
///
/// The client is cheap to clone; clones share the connection pool and the
/// progress observer.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use gitlab_admin::api::GitLabClient;
/// use gitlab_admin::auth::AuthCredential;
///
/// let client = GitLabClient::new("gitlab.example.com")?
///     .with_auth(AuthCredential::personal_access_token("glpat-xxxx"))
///     .with_probe_concurrency(4);
/// # Ok::<(), gitlab_admin::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct GitLabClient {
    /// The underlying HTTP client
    http: Client,
    /// API root, e.g. `https://gitlab.com/api/v4`
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
    /// Receiver for progress messages
    observer: Arc<dyn ProgressObserver>,
    /// Width of the has-subgroups probe fan-out
    probe_concurrency: usize,
}

impl GitLabClient {
    /// Creates a client for a GitLab domain (`https://{domain}/api/v4`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client could not be built.
    pub fn new(domain: &str) -> ApiResult<Self> {
        Self::with_base_url(&api_root(domain))
    }

    /// Creates a client for an explicit API root.
    ///
    /// Used for self-hosted instances served over plain HTTP and for tests
    /// against a mock server.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gitlab_admin::api::GitLabClient;
    ///
    /// let client = GitLabClient::with_base_url("http://127.0.0.1:1234/api/v4")?;
    /// assert_eq!(client.base_url(), "http://127.0.0.1:1234/api/v4");
    /// # Ok::<(), gitlab_admin::api::ApiError>(())
    /// ```
    pub fn with_base_url(base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("gla/{}", crate::VERSION))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: None,
            observer: Arc::new(TracingObserver),
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
        })
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets how many has-subgroups probes may run at once (minimum 1).
    pub fn with_probe_concurrency(mut self, width: usize) -> Self {
        self.probe_concurrency = width.max(1);
        self
    }

    /// Returns the API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the progress observer.
    pub fn observer(&self) -> &dyn ProgressObserver {
        self.observer.as_ref()
    }

    /// Returns the probe fan-out width.
    pub fn probe_concurrency(&self) -> usize {
        self.probe_concurrency
    }

    /// Fetches the user that owns the token (`GET /user`).
    ///
    /// Used to validate a token before storing it.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.get("/user", "user data").await
    }

    /// Makes a GET request and decodes the JSON body.
    ///
    /// `what` names the payload in deserialization errors ("group data").
    pub async fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> ApiResult<T> {
        let request = self.http.get(self.url(path));
        let response = self.send(request).await?;
        decode(response, what).await
    }

    /// Makes a GET request with query parameters and decodes the JSON body.
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q, what: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request).await?;
        decode(response, what).await
    }

    /// Fetches one page of a list endpoint.
    ///
    /// The total page count is taken from the `X-Total-Pages` header when
    /// present and numeric.
    pub async fn get_page<T, Q>(&self, path: &str, query: &Q, what: &str) -> ApiResult<Page<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request).await?;

        let total_pages = response
            .headers()
            .get(TOTAL_PAGES_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u32>().ok());

        let items = decode(response, what).await?;
        Ok(Page { items, total_pages })
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B, what: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send(request).await?;
        decode(response, what).await
    }

    /// Makes a PUT request with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B, what: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.put(self.url(path)).json(body);
        let response = self.send(request).await?;
        decode(response, what).await
    }

    /// Makes a DELETE request, optionally with query parameters.
    ///
    /// The response body is ignored.
    pub async fn delete<Q>(&self, path: &str, query: &Q) -> ApiResult<()>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.http.delete(self.url(path)).query(query);
        self.send(request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Applies auth, sends, and turns non-success statuses into errors.
    async fn send(&self, mut request: RequestBuilder) -> ApiResult<Response> {
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %truncate_body(&text), "request failed");
            return Err(ApiError::from_status(status, &text));
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> ApiResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::deserialize(what, e))
}

/// Shortens an error body for debug logs.
fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(120) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_for_bare_domain() {
        assert_eq!(api_root("gitlab.example.com"), "https://gitlab.example.com/api/v4");
        assert_eq!(api_root(" gitlab.com/ "), "https://gitlab.com/api/v4");
    }

    #[test]
    fn test_api_root_keeps_scheme() {
        assert_eq!(api_root("http://10.0.0.5"), "http://10.0.0.5/api/v4");
    }

    #[test]
    fn test_probe_concurrency_is_at_least_one() {
        let client = GitLabClient::with_base_url("http://localhost/api/v4")
            .unwrap()
            .with_probe_concurrency(0);
        assert_eq!(client.probe_concurrency(), 1);
        assert_eq!(client.base_url(), "http://localhost/api/v4");
    }
}

//! Thin REST wrapper over reqwest for the z/OSMF service.
//!
//! Each method performs one HTTP verb against a resource path, expects a
//! JSON body back, and decodes it. Non-2xx statuses become
//! [`TsoError::Http`]; network failures propagate as
//! [`TsoError::Transport`] unchanged. No retries are performed at this
//! layer.

use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use zosmf_protocol::constants::CSRF_HEADER;

use crate::error::{TsoError, TsoResult};
use crate::session::ZosmfSession;
use crate::tso::validation;

/// Environment variable gating insecure TLS. Without it, a session asking
/// for `validate_certificates = false` is overridden back to validation.
const INSECURE_TLS_ENV_VAR: &str = "ZOSMF_ALLOW_INSECURE_TLS";

/// REST client bound to one [`ZosmfSession`].
pub struct ZosmfRestClient {
    http: HttpClient,
    base_url: String,
    session: ZosmfSession,
}

impl std::fmt::Debug for ZosmfRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZosmfRestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ZosmfRestClient {
    /// Build a client for the given session.
    ///
    /// Fails fast on a session with no host, before any request is made.
    pub fn new(session: ZosmfSession) -> TsoResult<Self> {
        validation::validate_session(&session)?;

        // Cargo features are additive and another dependency may pull in
        // native-tls; request rustls explicitly.
        let mut builder = HttpClient::builder()
            .use_rustls_tls()
            .timeout(session.timeout);

        if !session.validate_certificates {
            if std::env::var(INSECURE_TLS_ENV_VAR).is_err() {
                error!(
                    "certificate validation disabled but {} not set; \
                     overriding to validate_certificates=true",
                    INSECURE_TLS_ENV_VAR
                );
            } else {
                warn!(
                    "TLS certificate validation is DISABLED; only use this \
                     against test systems"
                );
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let http = builder.build()?;
        let base_url = session.base_url();
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session this client was built from.
    pub fn session(&self) -> &ZosmfSession {
        &self.session
    }

    fn url(&self, resource: &str) -> String {
        format!("{}{}", self.base_url, resource)
    }

    fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, self.url(resource))
            .header(CSRF_HEADER, "")
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = &self.session.token {
            request = request.bearer_auth(token);
        } else if let Some(user) = &self.session.user {
            request = request.basic_auth(user, self.session.password.as_deref());
        }

        request
    }

    async fn expect_json<T: DeserializeOwned>(request: RequestBuilder) -> TsoResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TsoError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// GET a resource, expecting JSON back.
    pub async fn get_expect_json<T: DeserializeOwned>(&self, resource: &str) -> TsoResult<T> {
        debug!(resource, "GET");
        Self::expect_json(self.request(Method::GET, resource)).await
    }

    /// POST to a resource with an optional JSON body, expecting JSON back.
    pub async fn post_expect_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        body: Option<&serde_json::Value>,
    ) -> TsoResult<T> {
        debug!(resource, "POST");
        let mut request = self.request(Method::POST, resource);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::expect_json(request).await
    }

    /// PUT a JSON body to a resource, expecting JSON back.
    pub async fn put_expect_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        body: Option<&serde_json::Value>,
    ) -> TsoResult<T> {
        debug!(resource, "PUT");
        let mut request = self.request(Method::PUT, resource);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::expect_json(request).await
    }

    /// PUT a plain-text body to a resource, expecting JSON back. Used by the
    /// app-communication send path.
    pub async fn put_text_expect_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        body: String,
    ) -> TsoResult<T> {
        debug!(resource, "PUT (text/plain)");
        let request = self
            .request(Method::PUT, resource)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body);
        Self::expect_json(request).await
    }

    /// DELETE a resource, expecting JSON back.
    pub async fn delete_expect_json<T: DeserializeOwned>(&self, resource: &str) -> TsoResult<T> {
        debug!(resource, "DELETE");
        Self::expect_json(self.request(Method::DELETE, resource)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_session_without_host() {
        let result = ZosmfRestClient::new(ZosmfSession::default());
        assert!(matches!(result, Err(TsoError::InvalidInput(_))));
    }

    #[test]
    fn builds_resource_urls_from_session() {
        let client = ZosmfRestClient::new(ZosmfSession {
            host: "host.com".to_string(),
            port: 1443,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.url("/zosmf/tsoApp/tso"),
            "https://host.com:1443/zosmf/tsoApp/tso"
        );
    }
}

//! Connection parameters for a z/OSMF host.

use std::time::Duration;

/// Connection parameters used to authenticate each REST call.
///
/// A session outlives any single operation. It is passed by reference into
/// every operation (via [`crate::rest::ZosmfRestClient`]) and is never
/// mutated by this subsystem.
#[derive(Clone, Debug)]
pub struct ZosmfSession {
    /// z/OSMF host name.
    pub host: String,

    /// z/OSMF port.
    pub port: u16,

    /// User for basic authentication.
    pub user: Option<String>,

    /// Password for basic authentication.
    pub password: Option<String>,

    /// Bearer token. Takes precedence over basic credentials when set.
    pub token: Option<String>,

    /// Use HTTPS. Plain HTTP is only useful against test doubles.
    pub secure: bool,

    /// Validate TLS certificates.
    ///
    /// Disabling requires the `ZOSMF_ALLOW_INSECURE_TLS` environment
    /// variable; without it the client overrides back to validation.
    pub validate_certificates: bool,

    /// Optional base path prepended to every resource (e.g. behind an API
    /// mediation gateway).
    pub base_path: Option<String>,

    /// Request timeout. Also the only upper bound on each poll iteration of
    /// the plain command-collection loop.
    pub timeout: Duration,
}

impl Default for ZosmfSession {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 443,
            user: None,
            password: None,
            token: None,
            secure: true,
            validate_certificates: true,
            base_path: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ZosmfSession {
    /// Base URL for this session, e.g. `https://host:443`.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let base_path = self.base_path.as_deref().unwrap_or("");
        format!("{}://{}:{}{}", scheme, self.host, self.port, base_path)
    }
}

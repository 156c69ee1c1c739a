/// Retail banner the upstream API is scoped to.
///
/// The upstream serves several banners from the same endpoints; only the
/// Superstore banner is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    #[default]
    Superstore,
}

impl Banner {
    /// Identifier sent to the upstream in query strings and request bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Banner::Superstore => "superstore",
        }
    }
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    /// Upstream API key. Absence is tolerated at load time and reported as
    /// `unauthorized` when an operation first needs it.
    pub api_key: Option<String>,
    pub base_url: String,
    pub banner: Banner,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub log_level: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("banner", &self.banner)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

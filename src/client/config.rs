use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Deployment hook read when the client starts.
pub const OVERRIDE_VAR: &str = "API_URL_OVERRIDE";

/// Value baked in when the client was compiled.
const BUILD_TIME_URL: Option<&str> = option_env!("DONAR_API_URL");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    RuntimeOverride,
    BuildTime,
    Fallback,
}

/// API base URL, resolved once at start-up and handed to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    source: UrlSource,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ApiConfig {
    /// Runtime override, then build-time value, then the local default.
    pub fn resolve(runtime_override: Option<&str>, build_time: Option<&str>) -> Self {
        let (url, source) = if let Some(url) = non_empty(runtime_override) {
            (url, UrlSource::RuntimeOverride)
        } else if let Some(url) = non_empty(build_time) {
            (url, UrlSource::BuildTime)
        } else {
            (DEFAULT_API_URL, UrlSource::Fallback)
        };

        Self {
            base_url: url.trim_end_matches('/').to_string(),
            source,
        }
    }

    pub fn from_runtime() -> Self {
        let runtime = env::var(OVERRIDE_VAR).ok();
        let config = Self::resolve(runtime.as_deref(), BUILD_TIME_URL);
        tracing::debug!(base_url = %config.base_url, source = ?config.source, "api url resolved");
        config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source(&self) -> UrlSource {
        self.source
    }

    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    pub fn favorites_url(&self, user_id: &str) -> String {
        format!("{}/users/{}/favoritos", self.base_url, user_id)
    }

    pub fn favorite_url(&self, user_id: &str, product_id: &str) -> String {
        format!("{}/{}", self.favorites_url(user_id), product_id)
    }
}

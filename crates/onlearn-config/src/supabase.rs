//! Managed backend (Supabase) connection settings.
//!
//! The service-role key is used for both the identity endpoints
//! (`/auth/v1/...`) and the storage endpoints (`/storage/v1/...`).
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL`: project URL, e.g. `https://abcd.supabase.co`
//! - `SUPABASE_SERVICE_ROLE_KEY`: service-role API key
//! - `HTTP_CLIENT_TIMEOUT_SECS`: timeout for calls to the project (default: 10)

use std::env;
use std::time::Duration;

use crate::env_parse;

#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("SUPABASE_URL").unwrap_or_default(),
            service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(env_parse("HTTP_CLIENT_TIMEOUT_SECS", 10)),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.service_role_key.is_empty()
    }
}

// The key never ends up in logs.
impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co".to_string(),
            service_role_key: "super-secret".to_string(),
            timeout: Duration::from_secs(10),
        };

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("abcd.supabase.co"));
        assert!(!rendered.contains("super-secret"));
        assert!(config.is_configured());
    }
}

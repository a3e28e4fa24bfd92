//! Authenticated principals and the provider seam that issues them.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A principal authenticated by the external identity provider.
///
/// `id` is also the primary key of the caller's profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider did not accept the token or returned no user.
    #[error("invalid or expired token")]
    Rejected,

    #[error("identity provider is not configured")]
    NotConfigured,

    #[error("identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with an error; the message is the provider's own.
    #[error("{0}")]
    Upstream(String),
}

pub type IdentityFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, IdentityError>> + Send + 'a>>;

/// External identity provider.
///
/// Implementations perform one network round trip per call; nothing is
/// cached between requests.
pub trait IdentityProvider: Send + Sync {
    /// Exchange a bearer token for the identity it was issued to.
    fn verify<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Identity>;

    /// Remove an identity from the provider. Deleting an identity that no
    /// longer exists succeeds.
    fn delete_identity(&self, id: Uuid) -> IdentityFuture<'_, ()>;
}

#[cfg(any(test, feature = "test-utils"))]
mod static_provider {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-process provider with a fixed token table.
    #[derive(Debug, Default)]
    pub struct StaticIdentityProvider {
        tokens: HashMap<String, Identity>,
        deleted: Mutex<Vec<Uuid>>,
    }

    impl StaticIdentityProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_token(mut self, token: impl Into<String>, id: Uuid) -> Self {
            self.tokens.insert(
                token.into(),
                Identity {
                    id,
                    email: Some(format!("{}@onlearn.test", id.simple())),
                },
            );
            self
        }

        pub fn deleted(&self) -> Vec<Uuid> {
            self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
        }
    }

    impl IdentityProvider for StaticIdentityProvider {
        fn verify<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Identity> {
            Box::pin(async move { self.tokens.get(token).cloned().ok_or(IdentityError::Rejected) })
        }

        fn delete_identity(&self, id: Uuid) -> IdentityFuture<'_, ()> {
            Box::pin(async move {
                if let Ok(mut deleted) = self.deleted.lock() {
                    deleted.push(id);
                }
                Ok(())
            })
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use static_provider::StaticIdentityProvider;

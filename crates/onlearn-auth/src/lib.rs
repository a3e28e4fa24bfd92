//! # OnLearn Auth
//!
//! Bearer-token verification for the OnLearn API.
//!
//! Tokens are issued and validated by the managed identity provider; this
//! crate never inspects token contents itself. It provides:
//!
//! - [`bearer`]: `Authorization` header parsing
//! - [`identity`]: the [`Identity`] type and the [`IdentityProvider`] trait
//! - [`supabase`]: the provider implementation backed by Supabase Auth
//!
//! # Example
//!
//! ```ignore
//! use onlearn_auth::{IdentityProvider, SupabaseIdentityProvider, extract_bearer_token};
//! use onlearn_config::SupabaseConfig;
//!
//! let provider = SupabaseIdentityProvider::new(&SupabaseConfig::from_env())?;
//! let token = extract_bearer_token(header_value)?;
//! let identity = provider.verify(token).await?;
//! println!("User ID: {}", identity.id);
//! ```

pub mod bearer;
pub mod identity;
pub mod supabase;

pub use bearer::{BearerError, extract_bearer_token};
pub use identity::{Identity, IdentityError, IdentityFuture, IdentityProvider};
pub use supabase::SupabaseIdentityProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use identity::StaticIdentityProvider;

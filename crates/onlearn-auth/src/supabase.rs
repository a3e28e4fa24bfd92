//! Supabase Auth backed identity provider.
//!
//! - token verification: `GET {project}/auth/v1/user` with the caller's token
//! - identity removal: `DELETE {project}/auth/v1/admin/users/{id}` with the
//!   service-role key

use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use onlearn_config::SupabaseConfig;

use crate::identity::{Identity, IdentityError, IdentityFuture, IdentityProvider};

#[derive(Clone, Debug)]
pub struct SupabaseIdentityProvider {
    client: reqwest::Client,
    config: SupabaseConfig,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl SupabaseIdentityProvider {
    pub fn new(config: &SupabaseConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    fn ensure_configured(&self) -> Result<(), IdentityError> {
        if !self.config.is_configured() {
            return Err(IdentityError::NotConfigured);
        }
        Ok(())
    }
}

async fn provider_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    serde_json::from_str::<AuthErrorBody>(&text)
        .ok()
        .and_then(|body| body.msg.or(body.message).or(body.error_description))
        .unwrap_or_else(|| format!("identity provider returned {}", status))
}

impl IdentityProvider for SupabaseIdentityProvider {
    fn verify<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Identity> {
        Box::pin(async move {
            self.ensure_configured()?;

            let response = self
                .client
                .get(self.endpoint("user"))
                .bearer_auth(token)
                .header("apikey", &self.config.service_role_key)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let user = response
                        .json::<Option<AuthUser>>()
                        .await
                        .map_err(|_| IdentityError::Rejected)?
                        .ok_or(IdentityError::Rejected)?;

                    Ok(Identity {
                        id: user.id,
                        email: user.email,
                    })
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                    Err(IdentityError::Rejected)
                }
                _ => Err(IdentityError::Upstream(provider_message(response).await)),
            }
        })
    }

    fn delete_identity(&self, id: Uuid) -> IdentityFuture<'_, ()> {
        Box::pin(async move {
            self.ensure_configured()?;

            let response = self
                .client
                .delete(self.endpoint(&format!("admin/users/{}", id)))
                .bearer_auth(&self.config.service_role_key)
                .header("apikey", &self.config.service_role_key)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => Ok(()),
                StatusCode::NOT_FOUND => {
                    tracing::debug!(%id, "Identity already absent at provider");
                    Ok(())
                }
                _ => Err(IdentityError::Upstream(provider_message(response).await)),
            }
        })
    }
}

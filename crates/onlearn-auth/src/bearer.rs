/// Scheme prefix required on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("missing token")]
    Missing,
}

/// Extract the token from an `Authorization` header value.
///
/// The header must be present and start with the literal `Bearer ` prefix;
/// an empty token after the prefix counts as missing.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let token = header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(BearerError::Missing)?;

    if token.is_empty() {
        return Err(BearerError::Missing);
    }

    Ok(token)
}

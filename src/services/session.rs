use jsonwebtoken::{decode, DecodingKey, Validation};
use std::future::Future;
use thiserror::Error;

/// Errors raised while resolving the current session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Malformed access token: {0}")]
    MalformedToken(#[from] jsonwebtoken::errors::Error),
}

/// A signed-in user's bearer credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Source of the current session
///
/// `Ok(None)` means nobody is signed in. The match controller never touches
/// the network in that case.
pub trait SessionProvider {
    fn current_session(&self) -> impl Future<Output = Result<Option<Session>, SessionError>> + Send;
}

/// Session backed by a stored access token
///
/// The token is a JWT issued by the auth provider. Its signature is the
/// upstream function's business; only the `exp` claim is checked here so an
/// expired login reads as signed out.
#[derive(Debug, Clone, Default)]
pub struct StoredSession {
    access_token: Option<String>,
}

impl StoredSession {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    fn validation() -> Validation {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl SessionProvider for StoredSession {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        let Some(token) = self.access_token.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        match decode::<serde_json::Value>(token, &DecodingKey::from_secret(&[]), &Self::validation()) {
            Ok(_) => Ok(Some(Session {
                access_token: token.to_string(),
            })),
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                tracing::debug!("Stored access token has expired");
                Ok(None)
            }
            Err(e) => Err(SessionError::MalformedToken(e)),
        }
    }
}

//! Session verification
//!
//! The identity provider is an external collaborator behind the
//! [`SessionVerifier`] port: it turns an opaque session token into a caller
//! identity, or nothing. The default implementation verifies an HS256-signed
//! token carrying the user id, email, and expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "formcraft_session";

/// Authenticated caller identity attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

/// Port to the external identity provider.
pub trait SessionVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<Identity>;
}

/// Signed-token verifier (HS256).
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token for a user, valid for 8 hours.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::hours(8))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Identity {
            sub: user_id,
            email: email.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }
}

impl SessionVerifier for TokenVerifier {
    fn verify(&self, token: &str) -> Option<Identity> {
        decode::<Identity>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

//! HS256 access tokens.
//!
//! Tokens are stateless: the server keeps no session table, and a token stays
//! valid until its `exp` passes. Changing `JWT_SECRET` invalidates every
//! outstanding token at once.

use catalog_core::types::DbId;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clock skew tolerated when checking `exp`, in seconds.
const EXPIRY_LEEWAY_SECS: u64 = 30;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    /// Random per-token id, useful for correlating log lines.
    pub jti: String,
}

impl Claims {
    fn issue(user_id: DbId, username: &str, lifetime_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            sub: user_id,
            username: username.to_owned(),
            exp: iat + lifetime_secs,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetime, loaded from `JWT_SECRET` and
/// `JWT_EXPIRY_HOURS`.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Token lifetime in seconds, as reported to clients in `expires_in`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = EXPIRY_LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

/// Sign a token for `user_id` that expires after the configured lifetime.
pub fn generate_access_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, username, config.expiry_secs());
    encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())
}

/// Check signature, algorithm and expiry, then return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &config.decoding_key(), &JwtConfig::validation()).map(|data| data.claims)
}

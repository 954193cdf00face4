//! JWT access-token issuance and decoding.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload whose
//! subject is the username. Tokens are only ever issued here; the service
//! exposes no verification or refresh endpoint.

use std::fmt;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_var, ConfigError};

/// Value of the `type` claim on every token issued by this service.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the username the token was issued to.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Not-before time; equal to `iat`.
    pub nbf: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    /// Token kind, always [`ACCESS_TOKEN_TYPE`].
    #[serde(rename = "type")]
    pub token_type: String,
    /// `true` when issued directly from a password login.
    pub fresh: bool,
}

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
}

// The secret never appears in logs or panic messages.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry_mins", &self.access_token_expiry_mins)
            .finish()
    }
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: &str = "15";
/// Length of the secret generated when `JWT_SECRET` is unset.
const GENERATED_SECRET_LEN: usize = 64;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default          |
    /// |----------------------------|----------|------------------|
    /// | `JWT_SECRET`               | no       | random per process |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`             |
    ///
    /// Without `JWT_SECRET` tokens stop validating after a restart, so a
    /// warning is logged.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set; generating an ephemeral signing secret");
                generate_secret()
            }
        };

        let access_token_expiry_mins: i64 =
            parse_var("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?;
        if access_token_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_ACCESS_EXPIRY_MINS",
                value: access_token_expiry_mins.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry_mins,
        })
    }

    /// Access token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

fn generate_secret() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), GENERATED_SECRET_LEN)
}

/// Generate an HS256 access token whose subject is `identity`.
pub fn generate_access_token(
    identity: &str,
    fresh: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: identity.to_string(),
        iat: now,
        nbf: now,
        exp: now + config.expires_in_secs(),
        jti: Uuid::new_v4().to_string(),
        token_type: ACCESS_TOKEN_TYPE.to_string(),
        fresh,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

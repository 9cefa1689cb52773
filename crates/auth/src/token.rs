//! Token verification and the claims it yields.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{AuthError, AuthResult, DEFAULT_TOKEN_EXPIRATION_HOURS, DEFAULT_TOKEN_ISSUER};

/// Claims carried by an identity-provider token.
///
/// `sub` is the provider's stable user identifier; it is opaque to Plaza and
/// only meaningful to the user directory's reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (identity-provider user id).
    pub sub: String,
    /// Email address, when the provider shares it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the provider shares it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}

impl IdentityClaims {
    /// Creates new claims for a subject.
    pub fn new(
        subject: impl Into<String>,
        email: Option<String>,
        name: Option<String>,
        expiration_hours: u64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: subject.into(),
            email,
            name,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: DEFAULT_TOKEN_ISSUER.to_string(),
        }
    }

    /// Returns true if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Shared secret the identity provider signs tokens with.
    pub secret: String,
    /// Expected token issuer.
    pub issuer: String,
    /// Expiration applied to issued tokens.
    pub expiration_hours: u64,
}

impl VerifierConfig {
    /// Creates a new verifier configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            expiration_hours: DEFAULT_TOKEN_EXPIRATION_HOURS,
        }
    }

    /// Sets the expected issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the expiration time in hours.
    pub fn with_expiration_hours(mut self, hours: u64) -> Self {
        self.expiration_hours = hours;
        self
    }
}

/// Verifies bearer tokens against the shared secret and issuer.
#[derive(Clone)]
pub struct TokenVerifier {
    config: VerifierConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a new token verifier.
    pub fn new(config: VerifierConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Validates and decodes a token.
    pub fn verify_token(&self, token: &str) -> AuthResult<IdentityClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Issues a token for a subject. Stands in for the identity provider in
    /// tests and local development.
    pub fn issue_token(
        &self,
        subject: impl Into<String>,
        email: Option<String>,
        name: Option<String>,
    ) -> AuthResult<String> {
        let mut claims =
            IdentityClaims::new(subject, email, name, self.config.expiration_hours);
        claims.iss = self.config.issuer.clone();

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }
}

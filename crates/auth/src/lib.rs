//! Bearer token verification for Plaza.
//!
//! Authentication itself is delegated to an external identity provider; this
//! crate only verifies the bearer tokens that provider issues and exposes the
//! identity claims they carry. Token issuance exists for tests and local
//! development.

mod error;
mod token;

pub use error::*;
pub use token::*;

/// Default token expiration time in hours.
pub const DEFAULT_TOKEN_EXPIRATION_HOURS: u64 = 24;

/// Default token issuer.
pub const DEFAULT_TOKEN_ISSUER: &str = "plaza-identity";

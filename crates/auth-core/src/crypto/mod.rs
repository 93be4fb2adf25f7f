//! HMAC-SHA-512 token signing and verification.
//!
//! The signing secret never leaves [`TokenSigner`]; encoded tokens are handed
//! back as [`SecretString`] so they cannot end up in logs by accident.

use crate::config::TokenSettings;
use crate::errors::AuthError;
use crate::tokens::claims::Claims;
use common::jwt::{check_size, extract_alg, validate_iat};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS512;
const SIGNING_ALGORITHM_NAME: &str = "HS512";

/// Generic message for every verification failure.
const INVALID_TOKEN: &str = "The token is invalid or expired";

/// Signs and verifies tokens with the configured shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock_skew: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &SIGNING_ALGORITHM_NAME)
            .field("keys", &"[REDACTED]")
            .field("clock_skew", &self.clock_skew)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(settings: &TokenSettings) -> Self {
        let secret = settings.signing_secret().expose_secret().as_bytes();

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[settings.issuer()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock_skew: settings.clock_skew(),
        }
    }

    /// Sign claims into a compact JWT with header `{"alg":"HS512","typ":"JWT"}`.
    #[instrument(skip_all)]
    pub fn sign(&self, claims: &Claims) -> Result<SecretString, AuthError> {
        let header = Header::new(SIGNING_ALGORITHM);

        let token = encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(target: "crypto", error = %e, "JWT signing operation failed");
            AuthError::Crypto("Token signing failed".to_string())
        })?;

        Ok(SecretString::from(token))
    }

    /// Verify signature, algorithm, issuer, expiry and `iat`, returning the claims.
    ///
    /// Every failure yields the same `InvalidToken` message. The reason is only
    /// available at debug level.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        check_size(token).map_err(|_| invalid_token())?;

        let alg = extract_alg(token).map_err(|_| invalid_token())?;
        if alg != SIGNING_ALGORITHM_NAME {
            tracing::debug!(
                target: "crypto",
                alg = %alg,
                "Token rejected: unexpected signing algorithm"
            );
            return Err(invalid_token());
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(target: "crypto", error = %e, "Token verification failed");
            invalid_token()
        })?;
        let claims = token_data.claims;

        validate_iat(claims.iat, self.clock_skew).map_err(|_| invalid_token())?;

        if claims.exp <= claims.iat {
            tracing::debug!(
                target: "crypto",
                iat = claims.iat,
                exp = claims.exp,
                "Token rejected: exp not after iat"
            );
            return Err(invalid_token());
        }

        Ok(claims)
    }
}

fn invalid_token() -> AuthError {
    AuthError::InvalidToken(INVALID_TOKEN.to_string())
}

/// Generate a unique token id.
///
/// v4 UUIDs draw 122 bits from the OS CSPRNG.
pub fn generate_token_id() -> String {
    Uuid::new_v4().to_string()
}

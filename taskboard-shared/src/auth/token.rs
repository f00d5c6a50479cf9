/// Token service: signed, time-bounded identity tokens
///
/// This module issues and verifies the bearer tokens that assert
/// "subject = user id, issued at T, expires at T+TTL". Tokens are signed
/// using HS256 (HMAC-SHA256) with a server-held secret and are opaque to
/// clients: they can neither be forged nor have their lifetime extended.
///
/// # Security
///
/// - **Algorithm**: HS256, pinned by the verifier; the algorithm named in a
///   token's own header is never trusted, so algorithm-confusion and
///   signature-stripping attempts fail as bad signatures
/// - **Expiration**: fixed TTL per token, configurable at issuance
/// - **Secret Management**: secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::token::{issue_token, verify_token};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes!!";
///
/// let token = issue_token(42, secret, Duration::minutes(60))?;
/// let user_id = verify_token(&token, secret)?;
/// assert_eq!(user_id, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into every token and required at verification
const ISSUER: &str = "taskboard";

/// Error type for token verification
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token cannot be parsed or decoded, or carries unexpected claims
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Signature does not match, or the token names a different algorithm
    #[error("Token signature is invalid")]
    BadSignature,

    /// Current time is at or past the recorded expiry
    #[error("Token has expired")]
    Expired,
}

/// Token claims
///
/// # Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "taskboard")
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: i64,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user with the given time-to-live
    pub fn new(user_id: i64, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed token for a user
///
/// # Arguments
///
/// * `user_id` - Subject of the token
/// * `secret` - Secret key for signing (should be at least 32 bytes)
/// * `ttl` - Time until the token expires
///
/// # Errors
///
/// Returns `TokenError::Malformed` if encoding fails (practically
/// unreachable for HS256 with valid claims)
pub fn issue_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, ttl);
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &key)
        .map_err(|e| TokenError::Malformed(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts the subject user ID
///
/// Verifies:
/// - Signature is valid under the server secret
/// - Signing algorithm is HS256 (pinned; the token header is not trusted)
/// - Token hasn't expired (no leeway)
/// - Issuer is "taskboard"
///
/// # Errors
///
/// - `TokenError::Expired` if current time ≥ recorded expiry
/// - `TokenError::BadSignature` if the signature doesn't match or the token
///   claims a different algorithm
/// - `TokenError::Malformed` for anything that cannot be parsed or decoded
pub fn verify_token(token: &str, secret: &str) -> Result<i64, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
        jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        _ => TokenError::Malformed(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, Duration::minutes(60));

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, "taskboard");
        assert!(claims.exp > claims.iat);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue_token(42, SECRET, Duration::minutes(60)).expect("Should issue token");

        let user_id = verify_token(&token, SECRET).expect("Should verify token");
        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = issue_token(42, SECRET, Duration::minutes(60)).expect("Should issue token");

        let result = verify_token(&token, "a-completely-different-secret-key!!");
        assert!(matches!(result, Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_verify_expired_token() {
        // Negative TTL = already expired, even though the signature is valid
        let token = issue_token(42, SECRET, Duration::seconds(-3600)).expect("Should issue token");

        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let result = verify_token("not-a-token", SECRET);
        assert!(matches!(result, Err(TokenError::Malformed(_))));

        let result = verify_token("", SECRET);
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_stripped_signature() {
        let token = issue_token(42, SECRET, Duration::minutes(60)).expect("Should issue token");

        // Keep header and payload, drop the signature entirely
        let (head, _sig) = token.rsplit_once('.').unwrap();
        let stripped = format!("{}.", head);

        assert!(verify_token(&stripped, SECRET).is_err());
    }

    #[test]
    fn test_verify_tampered_payload() {
        let token_a = issue_token(1, SECRET, Duration::minutes(60)).unwrap();
        let token_b = issue_token(2, SECRET, Duration::minutes(60)).unwrap();

        // Splice token B's payload onto token A's signature
        let parts_a: Vec<&str> = token_a.split('.').collect();
        let parts_b: Vec<&str> = token_b.split('.').collect();
        let spliced = format!("{}.{}.{}", parts_a[0], parts_b[1], parts_a[2]);

        let result = verify_token(&spliced, SECRET);
        assert!(matches!(result, Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_is_expired() {
        let expired = Claims::new(42, Duration::seconds(-1));
        assert!(expired.is_expired());

        let live = Claims::new(42, Duration::minutes(5));
        assert!(!live.is_expired());
    }
}

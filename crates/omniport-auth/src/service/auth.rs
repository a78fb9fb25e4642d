//! JWT session token service

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::Expiry;
use moka::sync::Cache;

use crate::model::SessionClaims;

/// Session token cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, SessionClaims>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Revoked token ids, each kept until the token itself would have expired
static REVOKED_TOKENS: LazyLock<Cache<String, i64>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .expire_after(RevokedUntilExp)
        .build()
});

struct RevokedUntilExp;

impl Expiry<String, i64> for RevokedUntilExp {
    fn expire_after_create(
        &self,
        _jti: &String,
        exp: &i64,
        _created_at: Instant,
    ) -> Option<Duration> {
        let remaining = exp.saturating_sub(chrono::Utc::now().timestamp()).max(0);
        // Leeway applied by `Validation` is 60 seconds
        Some(Duration::from_secs(remaining.unsigned_abs() + 60))
    }
}

/// Decode and validate a session token with caching
pub fn decode_session_token_cached(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<SessionClaims> {
    if let Some(cached) = TOKEN_CACHE.get(token) {
        if REVOKED_TOKENS.contains_key(&cached.jti) {
            TOKEN_CACHE.invalidate(token);
            return Err(ErrorKind::InvalidToken.into());
        }
        let now = chrono::Utc::now().timestamp();
        if cached.exp > now {
            return Ok(cached);
        }
        TOKEN_CACHE.invalidate(token);
    }

    let claims = decode_session_token(token, secret_key)?;
    if REVOKED_TOKENS.contains_key(&claims.jti) {
        return Err(ErrorKind::InvalidToken.into());
    }
    TOKEN_CACHE.insert(token.to_string(), claims.clone());

    Ok(claims)
}

/// Decode and validate a session token without caching
pub fn decode_session_token(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<SessionClaims> {
    let decoding_key = DecodingKey::from_base64_secret(secret_key)?;
    decode::<SessionClaims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
}

/// Revoke a session so the token is rejected for the rest of its lifetime
pub fn revoke_token(token: &str, claims: &SessionClaims) {
    REVOKED_TOKENS.insert(claims.jti.clone(), claims.exp);
    TOKEN_CACHE.invalidate(token);
}

/// Encode a session token for `sub`
pub fn encode_session_token(
    sub: &str,
    secret_key: &str,
    expire_seconds: i64,
) -> jsonwebtoken::errors::Result<String> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(expire_seconds))
        .unwrap_or_else(chrono::Utc::now)
        .timestamp();

    let claims = SessionClaims {
        sub: sub.to_string(),
        exp,
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let encoding_key = EncodingKey::from_base64_secret(secret_key)?;
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::*;

    fn secret() -> String {
        base64::engine::general_purpose::STANDARD
            .encode("OmniportTestSecretKeyThatIsLongEnough0123456789")
    }

    #[test]
    fn test_encode_then_decode() {
        let token = encode_session_token("alice", &secret(), 60).unwrap();
        let claims = decode_session_token(&token, &secret()).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_tokens_for_same_subject_are_distinct() {
        let first = encode_session_token("alice", &secret(), 60).unwrap();
        let second = encode_session_token("alice", &secret(), 60).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let token = encode_session_token("alice", &secret(), 60).unwrap();
        let other = base64::engine::general_purpose::STANDARD
            .encode("AnotherSecretKeyThatIsAlsoLongEnough9876543210");
        assert!(decode_session_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = encode_session_token("alice", &secret(), -3600).unwrap();
        let err = decode_session_token(&token, &secret()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn test_cached_decode() {
        let token = encode_session_token("cached", &secret(), 60).unwrap();
        let first = decode_session_token_cached(&token, &secret()).unwrap();
        let second = decode_session_token_cached(&token, &secret()).unwrap();
        assert_eq!(first.sub, second.sub);
        assert!(TOKEN_CACHE.get(&token).is_some());
    }

    #[test]
    fn test_revoked_token_is_rejected_after_caching() {
        let token = encode_session_token("revoked", &secret(), 60).unwrap();
        let claims = decode_session_token_cached(&token, &secret()).unwrap();

        revoke_token(&token, &claims);

        assert!(TOKEN_CACHE.get(&token).is_none());
        let err = decode_session_token_cached(&token, &secret()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidToken));
        // Still a well formed token, only the session is gone
        assert!(decode_session_token(&token, &secret()).is_ok());
    }

    #[test]
    fn test_revocation_leaves_other_sessions_alone() {
        let revoked = encode_session_token("shared", &secret(), 60).unwrap();
        let other = encode_session_token("shared", &secret(), 60).unwrap();
        let claims = decode_session_token(&revoked, &secret()).unwrap();

        revoke_token(&revoked, &claims);

        assert!(decode_session_token_cached(&revoked, &secret()).is_err());
        assert_eq!(
            decode_session_token_cached(&other, &secret()).unwrap().sub,
            "shared"
        );
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_session_token_cached("not.a.token", &secret()).is_err());
    }
}

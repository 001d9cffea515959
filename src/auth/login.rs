//! Single-account login. Credentials come from configuration: the account
//! email plus an argon2 PHC hash of its password. On a match a signed
//! bearer token is issued.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::Utc;

use crate::config::AuthConfig;
use crate::error::{ApiError, Result};

use super::token::sign_token;

/// Issued token plus its lifetime, for the login response.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Check a credential pair against the configured account and issue a
/// token on success. Any mismatch maps to the same error so the response
/// leaks nothing about which part failed.
pub fn authenticate(auth: &AuthConfig, email: &str, password: &str) -> Result<IssuedToken> {
    if email != auth.login_email {
        return Err(ApiError::BadCredentials);
    }

    let parsed_hash =
        PasswordHash::new(&auth.password_hash).map_err(|_| ApiError::BadCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::BadCredentials)?;

    let token = sign_token(
        email,
        &auth.jwt_secret,
        Utc::now().timestamp(),
        auth.token_ttl_secs,
    )?;

    Ok(IssuedToken {
        token,
        expires_in: auth.token_ttl_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString};

    fn test_auth() -> AuthConfig {
        let salt = SaltString::from_b64("dGVzdHNhbHR0ZXN0c2FsdA").unwrap();
        let hash = Argon2::default()
            .hash_password(b"hunter2", &salt)
            .unwrap()
            .to_string();
        AuthConfig {
            login_email: "trader@example.com".into(),
            password_hash: hash,
            jwt_secret: "test-secret".into(),
            token_ttl_secs: 86_400,
        }
    }

    #[test]
    fn valid_pair_issues_verifiable_token() {
        let auth = test_auth();
        let issued = authenticate(&auth, "trader@example.com", "hunter2").unwrap();
        assert_eq!(issued.expires_in, 86_400);

        let claims =
            crate::auth::verify_token(&issued.token, "test-secret", Utc::now().timestamp())
                .unwrap();
        assert_eq!(claims.sub, "trader@example.com");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let auth = test_auth();
        let err = authenticate(&auth, "trader@example.com", "letmein").unwrap_err();
        assert!(matches!(err, ApiError::BadCredentials));
    }

    #[test]
    fn unknown_email_is_rejected() {
        let auth = test_auth();
        let err = authenticate(&auth, "other@example.com", "hunter2").unwrap_err();
        assert!(matches!(err, ApiError::BadCredentials));
    }
}
